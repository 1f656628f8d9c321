//! Sign-in and sign-out commands

use crate::api::FinanceApi;
use crate::error::{FinboardError, FinboardResult};
use crate::state::AppState;
use crate::storage::Password;

/// Environment variable that supplies the password non-interactively
pub const PASSWORD_ENV: &str = "FINBOARD_PASSWORD";

/// Read the password from `FINBOARD_PASSWORD`, else prompt without echo
fn read_password() -> FinboardResult<Password> {
    if let Ok(value) = std::env::var(PASSWORD_ENV) {
        return Ok(Password::new(value));
    }
    rpassword::prompt_password("Password: ")
        .map(Password::new)
        .map_err(|e| FinboardError::Io(format!("could not read password: {}", e)))
}

pub async fn handle_login_command<A: FinanceApi>(
    state: &mut AppState<A>,
    username: &str,
) -> FinboardResult<()> {
    let password = read_password()?;
    let session = state.sign_in(username, &password).await?;
    println!("Signed in as {}", session.user.display_name());
    Ok(())
}

pub fn handle_logout_command<A: FinanceApi>(state: &mut AppState<A>) -> FinboardResult<()> {
    if !state.is_signed_in() {
        println!("Not signed in.");
        return Ok(());
    }
    state.sign_out()?;
    println!("Signed out.");
    Ok(())
}
