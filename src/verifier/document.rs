use std::collections::HashMap;

use html5ever::driver;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// ARIA roles the page driver can locate by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Button,
    Textbox,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Button => f.write_str("button"),
            Role::Textbox => f.write_str("textbox"),
        }
    }
}

/// Position of a control within the `Document` it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(usize);

#[derive(Debug, Clone)]
pub struct Form {
    pub action: Option<String>,
    pub method: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Control {
    pub tag: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub value: Option<String>,
    pub aria_label: Option<String>,
    pub checked: bool,
    pub text: String,
    pub form: Option<usize>,
}

impl Control {
    fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or("text")
    }

    pub fn is_button(&self) -> bool {
        match self.tag.as_str() {
            "button" => true,
            "input" => matches!(self.kind(), "submit" | "button" | "reset" | "image"),
            _ => false,
        }
    }

    pub fn is_submit(&self) -> bool {
        match self.tag.as_str() {
            "button" => matches!(self.kind.as_deref(), None | Some("submit")),
            "input" => matches!(self.kind(), "submit" | "image"),
            _ => false,
        }
    }

    pub fn is_fillable(&self) -> bool {
        match self.tag.as_str() {
            "textarea" => true,
            "input" => !matches!(
                self.kind(),
                "button"
                    | "submit"
                    | "reset"
                    | "image"
                    | "checkbox"
                    | "radio"
                    | "hidden"
                    | "file"
                    | "range"
                    | "color"
            ),
            _ => false,
        }
    }

    fn is_textbox(&self) -> bool {
        match self.tag.as_str() {
            "textarea" => true,
            "input" => matches!(self.kind(), "text" | "email" | "search" | "tel" | "url"),
            _ => false,
        }
    }

    fn initial_value(&self) -> String {
        match self.tag.as_str() {
            "textarea" => self.text.clone(),
            _ => self.value.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
struct Label {
    text: String,
    for_id: Option<String>,
    nested_control: Option<usize>,
}

/// Owned snapshot of a parsed HTML page: its title, forms, labels and form controls.
#[derive(Debug, Clone, Default)]
pub struct Document {
    title: Option<String>,
    forms: Vec<Form>,
    labels: Vec<Label>,
    controls: Vec<Control>,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        let dom = driver::parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Self::default();
        document.walk(&dom.document);
        document
    }

    /// Trimmed `<title>` text, empty when the page has none.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.0)
    }

    pub fn form(&self, index: usize) -> Option<&Form> {
        self.forms.get(index)
    }

    /// Controls whose label text or `aria-label` contains `text`, ignoring case.
    pub fn controls_by_label(&self, text: &str) -> Vec<ControlId> {
        let needle = text.to_lowercase();
        let mut found = Vec::new();

        for label in self.labels.iter().filter(|l| l.text.to_lowercase().contains(&needle)) {
            let target = match &label.for_id {
                Some(for_id) => self
                    .controls
                    .iter()
                    .position(|c| c.id.as_deref() == Some(for_id.as_str())),
                None => label.nested_control,
            };
            if let Some(index) = target {
                push_unique(&mut found, ControlId(index));
            }
        }

        for (index, control) in self.controls.iter().enumerate() {
            let labelled = control
                .aria_label
                .as_ref()
                .is_some_and(|l| l.to_lowercase().contains(&needle));
            if labelled {
                push_unique(&mut found, ControlId(index));
            }
        }

        found
    }

    pub fn controls_by_role(&self, role: Role) -> Vec<ControlId> {
        self.controls
            .iter()
            .enumerate()
            .filter(|(_, c)| match role {
                Role::Button => c.is_button(),
                Role::Textbox => c.is_textbox(),
            })
            .map(|(index, _)| ControlId(index))
            .collect()
    }

    /// Name/value pairs a browser would send when `submitter` submits `form`.
    pub fn form_fields(
        &self,
        form: usize,
        values: &HashMap<ControlId, String>,
        submitter: ControlId,
    ) -> Vec<(String, String)> {
        let mut fields = Vec::new();

        for (index, control) in self.controls.iter().enumerate() {
            if control.form != Some(form) {
                continue;
            }
            let Some(name) = &control.name else {
                continue;
            };
            let id = ControlId(index);

            let value = if control.is_button() {
                if id != submitter {
                    continue;
                }
                control.value.clone().unwrap_or_default()
            } else if matches!(control.kind(), "checkbox" | "radio") && control.tag == "input" {
                if !control.checked {
                    continue;
                }
                control.value.clone().unwrap_or_else(|| "on".to_string())
            } else {
                values
                    .get(&id)
                    .cloned()
                    .unwrap_or_else(|| control.initial_value())
            };

            fields.push((name.clone(), value));
        }

        fields
    }

    // Iterative pre-order walk: page depth is controlled by the server under test
    fn walk(&mut self, root: &Handle) {
        let mut pending = vec![(Handle::clone(root), None, None)];

        while let Some((node, form, label)) = pending.pop() {
            self.visit(&node, form, label, &mut pending);
        }
    }

    fn visit(
        &mut self,
        node: &Handle,
        form: Option<usize>,
        label: Option<usize>,
        pending: &mut Vec<(Handle, Option<usize>, Option<usize>)>,
    ) {
        let mut form = form;
        let mut label = label;

        if let NodeData::Element { name, attrs, .. } = &node.data {
            let attrs = attrs.borrow();
            let attr = |key: &str| {
                attrs
                    .iter()
                    .find(|a| &*a.name.local == key)
                    .map(|a| a.value.to_string())
            };

            match &*name.local {
                "title" if self.title.is_none() => {
                    self.title = Some(normalise_whitespace(&text_content(node)));
                }
                "form" => {
                    self.forms.push(Form {
                        action: attr("action"),
                        method: attr("method"),
                    });
                    form = Some(self.forms.len() - 1);
                }
                "label" => {
                    self.labels.push(Label {
                        text: normalise_whitespace(&text_content(node)),
                        for_id: attr("for"),
                        nested_control: None,
                    });
                    label = Some(self.labels.len() - 1);
                }
                tag @ ("input" | "textarea" | "select" | "button") => {
                    let index = self.controls.len();
                    self.controls.push(Control {
                        tag: tag.to_string(),
                        id: attr("id"),
                        name: attr("name"),
                        kind: attr("type").map(|t| t.to_ascii_lowercase()),
                        value: attr("value"),
                        aria_label: attr("aria-label"),
                        checked: attr("checked").is_some(),
                        text: text_content(node),
                        form,
                    });

                    // A label without `for` labels the first control nested inside it
                    if let Some(owner) = label.and_then(|l| self.labels.get_mut(l)) {
                        if owner.for_id.is_none() && owner.nested_control.is_none() {
                            owner.nested_control = Some(index);
                        }
                    }
                }
                _ => {}
            }
        }

        // Reversed so children pop in document order
        for child in node.children.borrow().iter().rev() {
            pending.push((Handle::clone(child), form, label));
        }
    }
}

fn push_unique(found: &mut Vec<ControlId>, id: ControlId) {
    if !found.contains(&id) {
        found.push(id);
    }
}

fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    let mut pending = vec![Handle::clone(node)];

    while let Some(current) = pending.pop() {
        if let NodeData::Text { contents } = &current.data {
            text.push_str(&contents.borrow());
        }
        for child in current.children.borrow().iter().rev() {
            pending.push(Handle::clone(child));
        }
    }
    text
}

fn normalise_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
