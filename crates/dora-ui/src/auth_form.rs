//! Sign-in / sign-up form state and its client-side validation.

pub const SIGN_IN_FAILED: &str = "Failed to sign in. Please check your credentials.";
pub const SIGN_UP_FAILED: &str = "Failed to create an account.";

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    SignUp,
}

impl AuthMode {
    pub fn heading(&self) -> &str {
        match self {
            AuthMode::Login => "Login to Dora AI",
            AuthMode::SignUp => "Create Account",
        }
    }

    pub fn submit_label(&self, loading: bool) -> &str {
        match (self, loading) {
            (AuthMode::Login, false) => "Login",
            (AuthMode::Login, true) => "Signing in...",
            (AuthMode::SignUp, false) => "Sign Up",
            (AuthMode::SignUp, true) => "Creating Account...",
        }
    }

    pub fn switch_label(&self) -> &str {
        match self {
            AuthMode::Login => "Don't have an account? Sign up",
            AuthMode::SignUp => "Already have an account? Log in",
        }
    }
}

/// What the app should ask the identity provider to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    SignIn { email: String, password: String },
    SignUp { email: String, password: String },
}

#[derive(Debug, Clone)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub error: Option<String>,
    /// A provider call is in flight; the form is disabled
    pub loading: bool,
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            error: None,
            loading: false,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::Login,
        };
        self.error = None;
        self.confirm_password.clear();
    }

    /// Validate and, if the form is acceptable, mark it loading and return
    /// the request to run. On failure the message is left in `error`.
    pub fn submit(&mut self) -> Option<AuthRequest> {
        if self.loading {
            return None;
        }
        match self.validate() {
            Ok(request) => {
                self.error = None;
                self.loading = true;
                Some(request)
            }
            Err(message) => {
                self.error = Some(message.to_string());
                None
            }
        }
    }

    fn validate(&self) -> Result<AuthRequest, &'static str> {
        let email = self.email.trim().to_string();
        if email.is_empty() || self.password.is_empty() {
            return Err("Email and password are required");
        }
        match self.mode {
            AuthMode::Login => Ok(AuthRequest::SignIn {
                email,
                password: self.password.clone(),
            }),
            AuthMode::SignUp => {
                if self.password != self.confirm_password {
                    return Err("Passwords do not match");
                }
                if self.password.chars().count() < MIN_PASSWORD_LEN {
                    return Err("Password must be at least 6 characters");
                }
                Ok(AuthRequest::SignUp {
                    email,
                    password: self.password.clone(),
                })
            }
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    pub fn settle(&mut self) {
        self.loading = false;
    }

    /// Forget everything typed, e.g. after a successful sign-in
    pub fn clear(&mut self) {
        *self = Self {
            mode: self.mode,
            ..Self::new()
        };
    }
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}
