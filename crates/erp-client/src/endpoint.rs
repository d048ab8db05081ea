//! Endpoint templates
//!
//! Paths such as `/salesOrders/{id}/items` with `{name}` placeholders that are
//! filled from path parameters. Values are encoded as single path segments.

use erp_core::{ErpError, ErpResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    template: String,
    params: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            params: vec![],
        }
    }

    /// Bind a placeholder value (builder pattern)
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitute every placeholder
    pub fn render(&self) -> ErpResult<String> {
        let mut path = String::with_capacity(self.template.len() + 16);
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            let name = &rest[start + 1..start + len];
            let value = self
                .params
                .iter()
                .find(|(param, _)| param == name)
                .map(|(_, value)| value)
                .ok_or_else(|| ErpError::MissingPathParam {
                    template: self.template.clone(),
                    param: name.to_string(),
                })?;

            path.push_str(&rest[..start]);
            path.push_str(&urlencoding::encode(value));
            rest = &rest[start + len + 1..];
        }
        path.push_str(rest);

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let path = Endpoint::new("/salesOrders/{id}/items")
            .param("id", 42)
            .render()
            .unwrap();
        assert_eq!(path, "/salesOrders/42/items");
    }

    #[test]
    fn test_render_multiple_and_encoding() {
        let path = Endpoint::new("/sys/dictionaries/{name}/{code}")
            .param("code", "A/B C")
            .param("name", "units")
            .render()
            .unwrap();
        assert_eq!(path, "/sys/dictionaries/units/A%2FB%20C");
    }

    #[test]
    fn test_no_placeholders() {
        assert_eq!(Endpoint::new("/sys/info").render().unwrap(), "/sys/info");
    }

    #[test]
    fn test_missing_param() {
        let err = Endpoint::new("/firmdocs/{id}").render().unwrap_err();
        match err {
            ErpError::MissingPathParam { template, param } => {
                assert_eq!(template, "/firmdocs/{id}");
                assert_eq!(param, "id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
