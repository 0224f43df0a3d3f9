use std::sync::Mutex;

use console::style;

use rp_core::flow::{FlowState, FormField, Progress, Step};
use rp_core::password_reset::{ResetState, ResetStep};
use rp_core::ports::{FlowObserverPort, PasswordResetObserverPort};
use rp_core::{Feedback, Toast, ToastKind};

pub fn step_title(step: Step) -> &'static str {
    match step {
        Step::EventCode => "Event code",
        Step::LoginSignup => "Log in or create an account",
        Step::UserCheck => "Your email",
        Step::OtpSend => "Verify your email",
        Step::OtpVerify => "Enter verification code",
        Step::Registration => "Your details",
        Step::Complete => "All set",
    }
}

pub fn reset_step_title(step: ResetStep) -> &'static str {
    match step {
        ResetStep::RequestCode => "Reset password",
        ResetStep::Reset => "Choose a new password",
        ResetStep::Done => "Password changed",
    }
}

pub fn progress_line(progress: Progress) -> String {
    format!(
        "Step {} of {} ({:.0}%)",
        progress.current, progress.total, progress.percentage
    )
}

pub fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::Email => "Email",
        FormField::Username => "Username",
        FormField::FirstName => "First name",
        FormField::LastName => "Last name",
        FormField::Password => "Password",
        FormField::PasswordConfirm => "Confirm password",
        FormField::Institution => "Institution (optional)",
        FormField::Department => "Department (optional)",
    }
}

pub fn toast_line(toast: &Toast) -> String {
    let marker = match toast.kind {
        ToastKind::Error => "✖",
        ToastKind::Warning => "!",
        ToastKind::Success => "✔",
        ToastKind::Info => "i",
    };
    format!("{marker} {}", toast.message)
}

/// Summary shown on the last page of the signup flow.
pub fn completion_lines(state: &FlowState) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(status) = &state.user_status {
        let email = status
            .user_email
            .as_deref()
            .unwrap_or(&state.form_data.email);
        if !email.is_empty() {
            lines.push(format!("Account: {email}"));
        }
        if let Some(event) = &status.event_name {
            lines.push(format!("Registered for: {event}"));
        }
        if let Some(id) = &status.registration_id {
            lines.push(format!("Registration id: {id}"));
        }
        if let Some(at) = status.registered_at {
            lines.push(format!("Registered at: {}", at.format("%Y-%m-%d %H:%M UTC")));
        }
    }
    if state.session.is_some() {
        lines.push("You are logged in.".to_string());
    } else {
        lines.push("Check your inbox to verify your email before logging in.".to_string());
    }
    lines
}

fn print_feedback(feedback: &Feedback) {
    for (field, message) in &feedback.field_errors {
        println!("  {} {}", style(format!("{field}:")).red().bold(), style(message).red());
    }
    for toast in &feedback.toasts {
        let line = toast_line(toast);
        let styled = match toast.kind {
            ToastKind::Error => style(line).red(),
            ToastKind::Warning => style(line).yellow(),
            ToastKind::Success => style(line).green(),
            ToastKind::Info => style(line).cyan(),
        };
        println!("{styled}");
    }
}

#[derive(Debug, Clone, PartialEq)]
struct View<S> {
    step: S,
    visit: u64,
    is_loading: bool,
    feedback: Feedback,
}

/// Prints what changed between two consecutive states of a flow.
///
/// Controllers emit on every settled state; only step changes, loading
/// starts and new feedback reach the terminal.
#[derive(Default)]
pub struct ConsoleObserver {
    flow: Mutex<Option<View<Step>>>,
    reset: Mutex<Option<View<ResetStep>>>,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

fn render<S: Copy + PartialEq>(
    slot: &Mutex<Option<View<S>>>,
    next: View<S>,
    header: impl FnOnce() -> String,
) {
    let mut last = match slot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let previous = last.replace(next.clone());

    let entered = previous
        .as_ref()
        .map_or(true, |p| p.step != next.step || p.visit != next.visit);
    if entered {
        println!();
        println!("{}", style(header()).bold());
    }
    if next.is_loading && !previous.as_ref().is_some_and(|p| p.is_loading) {
        println!("{}", style("Contacting the platform...").dim());
    }
    if !next.feedback.is_empty()
        && previous.as_ref().map_or(true, |p| p.feedback != next.feedback)
    {
        print_feedback(&next.feedback);
    }
}

#[async_trait::async_trait]
impl FlowObserverPort for ConsoleObserver {
    async fn emit_flow_state_changed(&self, state: FlowState) {
        let step = state.current_step;
        let progress = state.progress();
        render(
            &self.flow,
            View {
                step,
                visit: state.visit,
                is_loading: state.is_loading,
                feedback: state.feedback,
            },
            || format!("{}  {}", step_title(step), style(progress_line(progress)).dim()),
        );
    }
}

#[async_trait::async_trait]
impl PasswordResetObserverPort for ConsoleObserver {
    async fn emit_reset_state_changed(&self, state: ResetState) {
        let step = state.current_step;
        render(
            &self.reset,
            View {
                step,
                visit: state.visit,
                is_loading: state.is_loading,
                feedback: state.feedback,
            },
            || reset_step_title(step).to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_core::flow::{AuthTokens, UserStatusSummary};

    #[test]
    fn progress_is_rounded() {
        assert_eq!(progress_line(Step::UserCheck.progress()), "Step 3 of 7 (43%)");
        assert_eq!(progress_line(Step::Complete.progress()), "Step 7 of 7 (100%)");
    }

    #[test]
    fn toasts_carry_a_marker_per_kind() {
        assert_eq!(toast_line(&Toast::error("Nope")), "✖ Nope");
        assert_eq!(toast_line(&Toast::success("Done")), "✔ Done");
    }

    #[test]
    fn completion_summary_depends_on_session() {
        let mut state = FlowState::new();
        state.user_status = Some(UserStatusSummary {
            user_exists: true,
            user_email: Some("ada@example.org".into()),
            event_name: Some("CRDF Cyber Range 2025".into()),
            ..UserStatusSummary::default()
        });

        let lines = completion_lines(&state);
        assert_eq!(lines[0], "Account: ada@example.org");
        assert_eq!(lines[1], "Registered for: CRDF Cyber Range 2025");
        assert!(lines.last().is_some_and(|l| l.contains("verify your email")));

        state.session = Some(AuthTokens {
            access: "a".into(),
            refresh: "r".into(),
        });
        assert_eq!(
            completion_lines(&state).last().map(String::as_str),
            Some("You are logged in.")
        );
    }

    #[tokio::test]
    async fn observer_remembers_last_view() {
        let observer = ConsoleObserver::new();
        let mut state = FlowState::new();
        observer.emit_flow_state_changed(state.clone()).await;

        state.is_loading = true;
        observer.emit_flow_state_changed(state.clone()).await;

        let last = observer.flow.lock().unwrap().clone().unwrap();
        assert_eq!(last.step, Step::EventCode);
        assert!(last.is_loading);
    }
}
