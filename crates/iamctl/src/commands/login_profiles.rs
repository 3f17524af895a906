//! Console login profile commands

use anyhow::{Context, Result};
use clap::Args;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use iamctl_core::model::LoginProfile;
use iamctl_core::request::{CreateLoginProfileRequest, GetLoginProfileRequest};
use iamctl_core::response::{CreateLoginProfileResponse, GetLoginProfileResponse};
use iamctl_core::{IamCommand, Operation, PIPELINE_MARKER};
use std::fmt;
use std::io::Write;

/// Give a user a console password
#[derive(Args, Clone)]
pub struct NewLoginProfile {
    /// User name, or `-` to read names from stdin
    pub user_name: String,

    /// Initial password; prompted for without echo when omitted
    #[arg(long)]
    pub password: Option<String>,

    /// Whether the user must choose a new password at first sign-in
    #[arg(long, value_name = "BOOL")]
    pub password_reset_required: Option<bool>,
}

impl NewLoginProfile {
    /// Prompt for the password on the terminal if none was given
    pub fn resolve_password(&mut self) -> Result<()> {
        if self.password.is_some() {
            return Ok(());
        }
        let prompt = if self.user_name == PIPELINE_MARKER {
            "Password: ".to_string()
        } else {
            format!("Password for {}: ", self.user_name)
        };
        self.password = Some(read_password(&prompt)?);
        Ok(())
    }
}

/// Read one line from the terminal without echoing it
fn read_password(prompt: &str) -> Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;

    enable_raw_mode().context("Failed to enable raw terminal mode")?;
    let entered = read_hidden_line();
    disable_raw_mode().context("Failed to restore terminal mode")?;
    writeln!(stderr)?;

    entered?.context("Password entry cancelled")
}

/// `None` when the user cancels with Esc or Ctrl-C
fn read_hidden_line() -> Result<Option<String>> {
    let mut line = String::new();
    loop {
        let Event::Key(key) = event::read().context("Failed to read password")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(Some(line)),
            KeyCode::Esc => return Ok(None),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None);
            }
            KeyCode::Backspace => {
                line.pop();
            }
            KeyCode::Char(c) => line.push(c),
            _ => {}
        }
    }
}

impl fmt::Debug for NewLoginProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewLoginProfile")
            .field("user_name", &self.user_name)
            .field("password_reset_required", &self.password_reset_required)
            .finish_non_exhaustive()
    }
}

impl IamCommand for NewLoginProfile {
    type Request = CreateLoginProfileRequest;
    type Response = CreateLoginProfileResponse;
    type Output = LoginProfile;
    const OPERATION: Operation = Operation::CreateLoginProfile;

    fn build_request(&self) -> CreateLoginProfileRequest {
        CreateLoginProfileRequest {
            user_name: self.user_name.clone(),
            password: self.password.clone().unwrap_or_default(),
            password_reset_required: self.password_reset_required,
        }
    }

    fn project(&self, response: &CreateLoginProfileResponse) -> Vec<LoginProfile> {
        vec![response.login_profile.clone()]
    }

    fn target(&self) -> String {
        self.user_name.clone()
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.user_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.user_name = value;
    }
}

/// Show a user's login profile
#[derive(Args, Debug, Clone)]
pub struct GetLoginProfile {
    /// User name, or `-` to read names from stdin
    pub user_name: String,
}

impl IamCommand for GetLoginProfile {
    type Request = GetLoginProfileRequest;
    type Response = GetLoginProfileResponse;
    type Output = LoginProfile;
    const OPERATION: Operation = Operation::GetLoginProfile;

    fn build_request(&self) -> GetLoginProfileRequest {
        GetLoginProfileRequest {
            user_name: self.user_name.clone(),
        }
    }

    fn project(&self, response: &GetLoginProfileResponse) -> Vec<LoginProfile> {
        vec![response.login_profile.clone()]
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.user_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.user_name = value;
    }
}
