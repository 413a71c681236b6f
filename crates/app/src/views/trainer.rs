use myfit_client::{ClassRequest, TrainerApi};
use myfit_core::{
    BookingId, ClassBooking, ClassSession, ClassSessionId, DomainError, DomainResult, format_input,
    parse_local_datetime,
};

use super::Notice;

/// Raw field values of the class form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassForm {
    pub class_name: String,
    pub description: String,
    /// `YYYY-MM-DDTHH:MM`, local time.
    pub scheduled_at: String,
    /// Zero or negative means unlimited.
    pub max_capacity: i64,
}

impl ClassForm {
    pub fn from_class(class: &ClassSession) -> Self {
        Self {
            class_name: class.class_name.clone(),
            description: class.description.clone().unwrap_or_default(),
            scheduled_at: format_input(&class.scheduled_at),
            max_capacity: class.max_capacity.map(i64::from).unwrap_or(0),
        }
    }

    pub fn to_request(&self) -> DomainResult<ClassRequest> {
        let class_name = self.class_name.trim();
        if class_name.is_empty() {
            return Err(DomainError::validation("Class Name is required."));
        }
        let scheduled = self.scheduled_at.trim();
        if scheduled.is_empty() {
            return Err(DomainError::validation("Scheduled Date/Time is required."));
        }
        let scheduled_at = parse_local_datetime(scheduled)
            .ok_or_else(|| DomainError::validation("Scheduled Date/Time is invalid."))?;

        Ok(ClassRequest {
            class_name: class_name.to_string(),
            description: self.description.trim().to_string(),
            scheduled_at,
            max_capacity: u32::try_from(self.max_capacity).ok().filter(|c| *c > 0),
        })
    }
}

/// Members booked into one class.
#[derive(Debug, Clone, PartialEq)]
pub struct BookedMembers {
    pub class_id: ClassSessionId,
    pub bookings: Vec<ClassBooking>,
    pub error: Option<String>,
}

/// Trainer home: own classes, the create/edit form, and a class's roster.
#[derive(Debug, Clone, Default)]
pub struct TrainerDashboard {
    pub classes: Vec<ClassSession>,
    pub form: ClassForm,
    /// Class being edited; `None` means the form creates.
    pub editing: Option<ClassSessionId>,
    pub members: Option<BookedMembers>,
    pub notice: Notice,
}

impl TrainerDashboard {
    pub async fn load(&mut self, api: &dyn TrainerApi) {
        self.notice.error = None;
        match api.classes().await {
            Ok(classes) => self.classes = classes,
            Err(err) => {
                tracing::warn!(error = %err, "trainer classes load failed");
                self.notice.fail("Failed to load classes.");
            }
        }
    }

    pub async fn create(&mut self, api: &dyn TrainerApi) {
        self.notice.clear();
        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(err) => return self.notice.fail(err.message()),
        };

        match api.create_class(&request).await {
            Ok(()) => {
                self.notice.succeed("Class created successfully!");
                self.form = ClassForm::default();
                self.load(api).await;
            }
            Err(_) => self.notice.fail("Failed to create class."),
        }
    }

    /// Switch the form to editing `id`, pre-filled from the loaded list.
    pub fn edit(&mut self, id: ClassSessionId) -> DomainResult<()> {
        let class = self
            .classes
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::invalid_id(format!("no class with id {id}")))?;
        self.form = ClassForm::from_class(class);
        self.editing = Some(id);
        self.notice.clear();
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form = ClassForm::default();
        self.notice.clear();
    }

    /// Submit the form for the class being edited. No-op outside edit mode.
    pub async fn update(&mut self, api: &dyn TrainerApi) {
        let Some(id) = self.editing else { return };
        self.notice.clear();
        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(err) => return self.notice.fail(err.message()),
        };

        match api.update_class(id, &request).await {
            Ok(()) => {
                self.notice.succeed("Class updated successfully!");
                self.editing = None;
                self.form = ClassForm::default();
                self.load(api).await;
            }
            Err(_) => self.notice.fail("Failed to update class."),
        }
    }

    pub async fn delete(&mut self, api: &dyn TrainerApi, id: ClassSessionId) {
        self.notice.clear();
        match api.delete_class(id).await {
            Ok(()) => {
                self.notice.succeed("Class deleted successfully!");
                if self.editing == Some(id) {
                    self.editing = None;
                    self.form = ClassForm::default();
                }
                self.load(api).await;
            }
            Err(_) => self.notice.fail("Failed to delete class."),
        }
    }

    /// Open the roster of `id` and fetch its bookings.
    pub async fn show_members(&mut self, api: &dyn TrainerApi, id: ClassSessionId) {
        self.members = Some(BookedMembers {
            class_id: id,
            bookings: Vec::new(),
            error: None,
        });
        self.refresh_members(api).await;
    }

    pub fn close_members(&mut self) {
        self.members = None;
    }

    pub async fn set_attendance(&mut self, api: &dyn TrainerApi, booking: BookingId, present: bool) {
        self.notice.clear();
        match api.set_attendance(booking, present).await {
            Ok(()) => {
                self.refresh_members(api).await;
                self.notice.succeed("Attendance updated successfully.");
            }
            Err(_) => self.notice.fail("Failed to update attendance."),
        }
    }

    async fn refresh_members(&mut self, api: &dyn TrainerApi) {
        let Some(members) = self.members.as_mut() else { return };
        match api.booked_members(members.class_id).await {
            Ok(bookings) => {
                members.bookings = bookings;
                members.error = None;
            }
            Err(_) => {
                members.bookings.clear();
                members.error = Some("Failed to load bookings.".to_string());
            }
        }
    }
}
