use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use regex::Regex;
use reqwest::{RequestBuilder, redirect};
use url::Url;

use crate::verifier::VerificationError;
use crate::verifier::document::{Control, ControlId, Document, Role};

/// A control found on the current page. Stale once the page navigates away.
#[derive(Debug, Clone)]
pub struct Locator {
    generation: u64,
    control: ControlId,
    description: String,
}

impl Locator {
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Headless page driver: fetches pages over HTTP, keeps cookies, follows redirects and
/// submits forms the way a browser would.
pub struct Page {
    client: reqwest::Client,
    step_timeout: Duration,
    url: Option<Url>,
    document: Document,
    values: HashMap<ControlId, String>,
    generation: u64,
}

impl Page {
    pub fn new(step_timeout: Duration) -> Result<Self, VerificationError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::limited(10))
            .build()
            .map_err(VerificationError::Client)?;

        Ok(Self {
            client,
            step_timeout,
            url: None,
            document: Document::default(),
            values: HashMap::new(),
            generation: 0,
        })
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn title(&self) -> &str {
        self.document.title()
    }

    #[tracing::instrument(skip(self))]
    pub async fn goto(&mut self, url: &str) -> Result<(), VerificationError> {
        let url = self.resolve(url)?;
        let request = self.client.get(url.clone());
        self.navigate("navigate", url, request).await
    }

    pub fn get_by_label(&self, text: &str) -> Result<Locator, VerificationError> {
        let found = self.document.controls_by_label(text);
        self.single(found, format!("label `{text}`"))
    }

    pub fn get_by_role(&self, role: Role) -> Result<Locator, VerificationError> {
        let found = self.document.controls_by_role(role);
        self.single(found, format!("role `{role}`"))
    }

    pub fn fill(&mut self, locator: &Locator, value: &str) -> Result<(), VerificationError> {
        let control = self.resolve_locator(locator)?;
        if !control.is_fillable() {
            return Err(VerificationError::NotInteractable {
                description: locator.description.clone(),
                action: "filled",
            });
        }

        self.values.insert(locator.control, value.to_string());
        Ok(())
    }

    /// Activates a submit button, submitting its form and loading the response.
    #[tracing::instrument(skip_all, fields(locator = %locator.description))]
    pub async fn click(&mut self, locator: &Locator) -> Result<(), VerificationError> {
        let control = self.resolve_locator(locator)?;
        let not_clickable = || VerificationError::NotInteractable {
            description: locator.description.clone(),
            action: "clicked",
        };
        if !control.is_submit() {
            return Err(not_clickable());
        }
        let form_index = control.form.ok_or_else(not_clickable)?;
        let form = self.document.form(form_index).ok_or_else(not_clickable)?;

        // No action submits back to the current page
        let target = self.resolve(form.action.as_deref().unwrap_or_default())?;
        let method = form
            .method
            .as_deref()
            .unwrap_or("get")
            .to_ascii_lowercase();
        let fields = self
            .document
            .form_fields(form_index, &self.values, locator.control);

        let (url, request) = if method == "post" {
            let request = self.client.post(target.clone()).form(&fields);
            (target, request)
        } else {
            let mut target = target;
            target.query_pairs_mut().clear().extend_pairs(&fields);
            (target.clone(), self.client.get(target))
        };

        self.navigate("submit form", url, request).await
    }

    pub fn expect_title(&self, pattern: &Regex) -> Result<(), VerificationError> {
        if pattern.is_match(self.title()) {
            Ok(())
        } else {
            Err(VerificationError::TitleMismatch {
                pattern: pattern.as_str().to_string(),
                actual: self.title().to_string(),
            })
        }
    }

    async fn navigate(
        &mut self,
        step: &'static str,
        url: Url,
        request: RequestBuilder,
    ) -> Result<(), VerificationError> {
        let load = async {
            let response = request.send().await?;
            let final_url = response.url().clone();
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((final_url, status, body))
        };

        let (final_url, status, body) = within(step, self.step_timeout, load)
            .await?
            .map_err(|source| VerificationError::Navigation {
                url: url.to_string(),
                source,
            })?;

        self.document = Document::parse(&body);
        self.values.clear();
        self.generation += 1;
        tracing::debug!(url = %final_url, %status, title = %self.document.title(), "Page loaded");
        self.url = Some(final_url);
        Ok(())
    }

    fn single(
        &self,
        found: Vec<ControlId>,
        description: String,
    ) -> Result<Locator, VerificationError> {
        match found.as_slice() {
            [] => Err(VerificationError::ElementNotFound(description)),
            [control] => Ok(Locator {
                generation: self.generation,
                control: *control,
                description,
            }),
            many => Err(VerificationError::AmbiguousElement {
                description,
                count: many.len(),
            }),
        }
    }

    fn resolve_locator(&self, locator: &Locator) -> Result<&Control, VerificationError> {
        if locator.generation != self.generation {
            return Err(VerificationError::ElementNotFound(format!(
                "{} (the page has navigated since it was located)",
                locator.description
            )));
        }
        self.document
            .control(locator.control)
            .ok_or_else(|| VerificationError::ElementNotFound(locator.description.clone()))
    }

    fn resolve(&self, href: &str) -> Result<Url, VerificationError> {
        let resolved = match &self.url {
            Some(base) => base.join(href),
            None => Url::parse(href),
        };
        resolved.map_err(|e| VerificationError::InvalidUrl(href.to_string(), e))
    }
}

async fn within<F: Future>(
    step: &'static str,
    timeout: Duration,
    future: F,
) -> Result<F::Output, VerificationError> {
    tokio::time::timeout(timeout, future)
        .await
        .map_err(|_| VerificationError::VerificationTimeout { step, timeout })
}
