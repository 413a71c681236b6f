/// Inline success/error line shown above a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notice {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl Notice {
    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn succeed(&mut self, msg: impl Into<String>) {
        self.success = Some(msg.into());
    }

    pub fn fail(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.error.is_none()
    }
}
