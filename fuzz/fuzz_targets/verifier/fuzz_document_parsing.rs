// IDE: cargo-fuzz target
// Run with: cargo fuzz run fuzz_document_parsing
// Purpose: fuzz arbitrary HTML -> Document (exercises label/role lookup and form field collection)
#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use makersbnb::verifier::{Document, Role};

fuzz_target!(|data: &[u8]| {
    if let Ok(html) = std::str::from_utf8(data) {
        let document = Document::parse(html);
        let _ = document.title();

        for label in ["Username", "Email", "Password"] {
            for id in document.controls_by_label(label) {
                assert!(document.control(id).is_some());
            }
        }

        for button in document.controls_by_role(Role::Button) {
            if let Some(form) = document.control(button).and_then(|c| c.form) {
                let _ = document.form_fields(form, &HashMap::new(), button);
            }
        }
    }
});
