//! Controller layer: UI events, reducer-like state transitions, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;

use crossbeam_channel::Sender;

use crate::backend_bridge::commands::BackendCommand;

use self::{
    events::{UiError, UiEvent},
    orchestration::dispatch_backend_command,
    reducer::{ControllerState, Notification, SelectedFile},
};

/// Owns the session state and the sending half of the backend command queue.
/// Rejected actions are decided here and never reach the queue.
pub struct Controller {
    state: ControllerState,
    cmd_tx: Sender<BackendCommand>,
}

impl Controller {
    pub fn new(max_upload_bytes: u64, cmd_tx: Sender<BackendCommand>) -> Self {
        Self {
            state: ControllerState::new(max_upload_bytes),
            cmd_tx,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn select_file(&mut self, file: SelectedFile) -> bool {
        self.state.select_file(file)
    }

    pub fn upload(&mut self) -> bool {
        let cmd = self.state.begin_upload();
        self.dispatch(cmd)
    }

    pub fn ask(&mut self, question: &str) -> bool {
        let cmd = self.state.begin_ask(question);
        self.dispatch(cmd)
    }

    pub fn check_health(&mut self) -> bool {
        let cmd = self.state.begin_health_check();
        self.dispatch(cmd)
    }

    pub fn clear_collection(&mut self) -> bool {
        let cmd = self.state.begin_clear_collection();
        self.dispatch(cmd)
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        self.state.apply(event);
    }

    pub fn report_error(&mut self, err: UiError) {
        self.state.report_error(err);
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.state.take_notifications()
    }

    fn dispatch(&mut self, cmd: Option<BackendCommand>) -> bool {
        let Some(cmd) = cmd else {
            return false;
        };
        let context = cmd.context();
        let mut status = String::new();
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut status) {
            return true;
        }

        // Roll the flow back out of its pending phase so the action is usable again.
        self.state
            .apply(UiEvent::Error(UiError::transport(context, status.clone())));
        self.state.set_status(status);
        false
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
