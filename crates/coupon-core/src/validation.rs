// ── Accumulated field validation ──
//
// Validators never stop at the first problem: every violated field gets
// an entry, so a form can show all of its errors at once.

use std::fmt;

use serde::Serialize;

/// Field-keyed validation errors, one message per field, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F> {
    entries: Vec<(F, String)>,
}

impl<F> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: Copy + Eq> FieldErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        let message = message.into();
        if let Some(entry) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            entry.1 = message;
        } else {
            self.entries.push((field, message));
        }
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn contains(&self, field: F) -> bool {
        self.get(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.entries.iter().map(|(f, _)| *f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> + '_ {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// A single `(field, message)` pair with the field's wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Type-erased validation result, suitable for errors and output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl<F> From<FieldErrors<F>> for ValidationReport
where
    F: Into<&'static str>,
{
    fn from(errors: FieldErrors<F>) -> Self {
        Self {
            errors: errors
                .entries
                .into_iter()
                .map(|(field, message)| FieldError {
                    field: field.into(),
                    message,
                })
                .collect(),
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
    #[strum(serialize_all = "snake_case")]
    enum Field {
        Name,
        EndAge,
    }

    #[test]
    fn insert_replaces_per_field() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::EndAge, "End age cannot be empty");
        errors.insert(Field::Name, "name cannot be empty");
        errors.insert(Field::EndAge, "End age cannot be negative");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::EndAge), Some("End age cannot be negative"));
        assert_eq!(errors.fields().collect::<Vec<_>>(), [Field::EndAge, Field::Name]);
    }

    #[test]
    fn report_uses_wire_names() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Name, "name cannot be empty");
        errors.insert(Field::EndAge, "End age cannot be empty");

        let report = ValidationReport::from(errors);
        assert_eq!(
            report.to_string(),
            "name: name cannot be empty; end_age: End age cannot be empty"
        );
    }
}
