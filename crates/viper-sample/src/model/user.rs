use serde::Deserialize;

/// A user from the remote directory.
///
/// This is the entity the screen revolves around: decoded by the
/// interactor, forwarded untouched by the presenter, rendered by the view.
/// The upstream payload carries plenty more (username, address, company);
/// the screen models only what it shows, and the decoder ignores the rest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
}

impl User {
    /// Creates a user with no email, mainly for fixtures.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
        }
    }

    /// Sets the email, builder style.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// One-line label for list rendering.
    pub fn display_label(&self) -> String {
        match &self.email {
            Some(email) => format!("{:>3}  {}  <{}>", self.id, self.name, email),
            None => format!("{:>3}  {}", self.id, self.name),
        }
    }
}
