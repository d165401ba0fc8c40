//! Login, registration and session commands.

use std::io::Write;

use dialoguer::{Confirm, Password};
use shopverse_core::forms::{LoginForm, RegistrationForm};
use shopverse_core::validation::password_strength;
use shopverse_storefront::{AppError, Storefront};

use crate::{CliError, RegisterArgs, output};

pub async fn login(
    shop: &Storefront,
    out: &mut impl Write,
    email: String,
    password: Option<String>,
) -> Result<(), CliError> {
    let form = LoginForm {
        email,
        password: password_or_prompt(password, "Password")?,
    };
    let session = shop.login(&form).await?;
    writeln!(out, "Welcome back, {}", session.full_name())?;
    Ok(())
}

pub async fn register(
    shop: &Storefront,
    out: &mut impl Write,
    args: RegisterArgs,
) -> Result<(), CliError> {
    let password = password_or_prompt(args.password, "Password")?;
    let confirm_password = password_or_prompt(args.confirm_password, "Confirm password")?;
    let form = RegistrationForm {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        password,
        confirm_password,
    };
    let registration = form.validate().map_err(AppError::from)?;

    write!(out, "{}", output::strength(&password_strength(&form.password)))?;
    if registration.needs_confirmation()
        && !args.yes
        && !Confirm::new()
            .with_prompt("Your password is weak. Continue anyway?")
            .default(false)
            .interact()?
    {
        return Err(CliError::Cancelled);
    }

    let user = shop.register(&registration).await?;
    writeln!(
        out,
        "Account created for {}. Log in with `shopverse login -e {}`",
        user.full_name(),
        registration.email
    )?;
    Ok(())
}

pub fn logout(shop: &Storefront, out: &mut impl Write) -> Result<(), CliError> {
    shop.logout();
    writeln!(out, "Logged out")?;
    Ok(())
}

pub fn whoami(shop: &Storefront, out: &mut impl Write) -> Result<(), CliError> {
    let session = shop.session().get_session();
    write!(out, "{}", output::whoami(session.as_ref()))?;
    Ok(())
}

/// Use the password given on the command line or read it without echo.
///
/// A mismatched confirmation is left to the registration form to report.
fn password_or_prompt(given: Option<String>, prompt: &str) -> Result<String, CliError> {
    match given {
        Some(password) => Ok(password),
        None => Ok(Password::new().with_prompt(prompt).interact()?),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_given_password_skips_prompt() {
        let password = password_or_prompt(Some("Secure#2024".to_string()), "Password").unwrap();
        assert_eq!(password, "Secure#2024");
    }

    #[test]
    fn test_given_passwords_still_checked_for_mismatch() {
        let form = RegistrationForm {
            first_name: "Bilal".to_string(),
            last_name: "Ahmed".to_string(),
            email: "bilal@example.com".to_string(),
            password: password_or_prompt(Some("Bright#Sky42".to_string()), "Password").unwrap(),
            confirm_password: password_or_prompt(Some("Bright#Sky43".to_string()), "Confirm")
                .unwrap(),
        };
        let err = form.validate().err().map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("Passwords do not match"));
    }
}
