use crate::controller::AsrController;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The one session controller, constructed at startup
    pub controller: AsrController,
}

impl AppState {
    pub fn new(controller: AsrController) -> Self {
        Self { controller }
    }
}
