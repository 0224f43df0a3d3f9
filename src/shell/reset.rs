use anyhow::Result;
use console::style;

use rp_app::PasswordResetController;
use rp_core::password_reset::{ResetField, ResetStep};

use super::prompt;

pub async fn run_password_reset(controller: &PasswordResetController) -> Result<()> {
    loop {
        let state = controller.state().await;
        match state.current_step {
            ResetStep::RequestCode => {
                if prompt::select("Next", &["Email me a reset code", "Quit"]).await? != 0 {
                    return Ok(());
                }
                let email = prompt::text("Email", &state.email).await?;
                controller.handle_input_change(ResetField::Email, email).await;
                controller.request_code().await;
            }
            ResetStep::Reset => {
                if prompt::select("Next", &["Enter code and new password", "Back"]).await? != 0 {
                    controller.back().await;
                    continue;
                }
                let code = prompt::text("Reset code", "").await?;
                controller
                    .handle_input_change(ResetField::OtpCode, code.trim())
                    .await;
                let password = prompt::secret("New password").await?;
                controller
                    .handle_input_change(ResetField::NewPassword, password)
                    .await;
                let confirm = prompt::secret("Confirm new password").await?;
                controller
                    .handle_input_change(ResetField::ConfirmPassword, confirm)
                    .await;
                controller.submit_reset().await;
            }
            ResetStep::Done => {
                println!("{}", style("You can now log in with your new password.").green());
                return Ok(());
            }
        }
    }
}
