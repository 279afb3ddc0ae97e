use crate::routes::{SIGN_UP_FORM_ROUTE, USERS_ROUTE};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("The `{0}` view is unavailable")]
    Unavailable(&'static str),
}

/// Produces the HTML pages served by the application.
pub trait ViewRenderer: Send + Sync {
    fn sign_up_form(&self) -> Result<String, RenderError>;

    fn spaces(&self) -> Result<String, RenderError>;
}

pub const APPLICATION_NAME: &str = "MakersBnB";

/// Server-side rendered pages.
#[derive(Default, Clone, Copy)]
pub struct HtmlViews;

impl ViewRenderer for HtmlViews {
    fn sign_up_form(&self) -> Result<String, RenderError> {
        let body = format!(
            r#"<h1>Sign up</h1>
    <form action="{USERS_ROUTE}" method="post">
      <label for="username">Username</label>
      <input id="username" name="username" type="text" />
      <label for="email">Email</label>
      <input id="email" name="email" type="email" />
      <label for="password">Password</label>
      <input id="password" name="password" type="password" />
      <button type="submit">Sign up</button>
    </form>"#
        );
        Ok(layout("Sign up", &body))
    }

    fn spaces(&self) -> Result<String, RenderError> {
        let body = format!(
            r#"<h1>Spaces</h1>
    <p>No spaces have been listed yet.</p>
    <a href="{SIGN_UP_FORM_ROUTE}">Sign up</a>"#
        );
        Ok(layout("Spaces", &body))
    }
}

// Every page title reads "<page> - MakersBnB"
fn layout(page: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>{page} - {APPLICATION_NAME}</title>
  </head>
  <body>
    {body}
  </body>
</html>"#
    )
}
