use anyhow::Result;
use console::style;

use rp_app::FlowController;
use rp_core::flow::{FlowState, FormField, Step};

use super::prompt;
use super::render::{completion_lines, field_label};

enum Page {
    Stay,
    Quit,
}

/// Walk the signup flow until it completes or the user quits.
///
/// Returns the final state when the flow reached [`Step::Complete`].
pub async fn run_signup(controller: &FlowController) -> Result<Option<FlowState>> {
    loop {
        let state = controller.state().await;
        let page = match state.current_step {
            Step::EventCode => event_code_page(controller).await?,
            Step::LoginSignup => login_signup_page(controller, &state).await?,
            Step::UserCheck => user_check_page(controller, &state).await?,
            Step::OtpSend => otp_send_page(controller).await?,
            Step::OtpVerify => otp_verify_page(controller).await?,
            Step::Registration => registration_page(controller, &state).await?,
            Step::Complete => {
                for line in completion_lines(&state) {
                    println!("{line}");
                }
                return Ok(Some(state));
            }
        };
        if let Page::Quit = page {
            return Ok(None);
        }
    }
}

async fn event_code_page(controller: &FlowController) -> Result<Page> {
    let choice = prompt::select(
        "How do you want to start?",
        &["Enter an event code", "Continue without an event code", "Quit"],
    )
    .await?;
    match choice {
        0 => {
            let code = prompt::text("Event code", "").await?;
            controller.submit_event_code(code).await;
        }
        1 => {
            controller.skip_event_code().await;
        }
        _ => return Ok(Page::Quit),
    }
    Ok(Page::Stay)
}

async fn login_signup_page(controller: &FlowController, state: &FlowState) -> Result<Page> {
    if let Some(event) = &state.selected_event {
        println!("Event: {}", style(&event.event_name).bold());
    }
    let choice = prompt::select(
        "Do you already have an account?",
        &["Log in", "Create an account", "Back"],
    )
    .await?;
    match choice {
        0 => {
            let email = prompt::text(field_label(FormField::Email), &state.form_data.email).await?;
            controller.handle_input_change(FormField::Email, email).await;
            let password = prompt::secret(field_label(FormField::Password)).await?;
            controller
                .handle_input_change(FormField::Password, password)
                .await;
            controller.submit_login().await;
        }
        1 => {
            controller.choose_create_account().await;
        }
        _ => {
            controller.back().await;
        }
    }
    Ok(Page::Stay)
}

async fn user_check_page(controller: &FlowController, state: &FlowState) -> Result<Page> {
    let choice = prompt::select("Next", &["Enter your email", "Back"]).await?;
    if choice != 0 {
        controller.back().await;
        return Ok(Page::Stay);
    }
    let email = prompt::text(field_label(FormField::Email), &state.form_data.email).await?;
    controller.handle_input_change(FormField::Email, email).await;
    controller.submit_user_check().await;
    Ok(Page::Stay)
}

async fn otp_send_page(controller: &FlowController) -> Result<Page> {
    match prompt::select("Next", &["Send verification code", "Back"]).await? {
        0 => controller.send_otp().await,
        _ => controller.back().await,
    };
    Ok(Page::Stay)
}

async fn otp_verify_page(controller: &FlowController) -> Result<Page> {
    match prompt::select("Next", &["Enter the code", "Send a new code", "Back"]).await? {
        0 => {
            let code = prompt::text("Verification code", "").await?;
            controller.submit_otp(code.trim()).await;
        }
        1 => {
            controller.resend_otp().await;
        }
        _ => {
            controller.back().await;
        }
    }
    Ok(Page::Stay)
}

async fn registration_page(controller: &FlowController, state: &FlowState) -> Result<Page> {
    let choice = prompt::select("Next", &["Fill in your details and register", "Back"]).await?;
    if choice != 0 {
        controller.back().await;
        return Ok(Page::Stay);
    }

    for field in FormField::ALL {
        let label = field_label(field);
        let value = if field.is_secret() {
            prompt::secret(label).await?
        } else {
            let current = state.form_data.get(field).unwrap_or_default();
            prompt::text(label, current).await?
        };
        controller.handle_input_change(field, value).await;
    }
    controller.submit_registration().await;
    Ok(Page::Stay)
}
