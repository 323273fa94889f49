use crate::{
    api::{Category, CategoryPayload},
    components::forms::FieldErrors,
};

pub const CATEGORIES_ROUTE: &str = "/categories";
pub const CREATE_CATEGORY_ROUTE: &str = "/categories/create";

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const CATEGORY_FIELDS: &[&str] = &[FIELD_NAME, FIELD_DESCRIPTION];

pub fn view_href(id: i64) -> String {
    format!("{}/view/{}", CATEGORIES_ROUTE, id)
}

pub fn edit_href(id: i64) -> String {
    format!("{}/edit/{}", CATEGORIES_ROUTE, id)
}

pub fn parse_category_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok().filter(|id| *id > 0)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }
}

impl CategoryForm {
    /// Blank descriptions are omitted from the payload.
    pub fn validate(&self) -> Result<CategoryPayload, FieldErrors> {
        let name = self.name.trim();
        if name.is_empty() {
            let mut errors = FieldErrors::new();
            errors.insert(FIELD_NAME, "Category name is required.");
            return Err(errors);
        }
        let description = self.description.trim();
        Ok(CategoryPayload {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        let errors = CategoryForm {
            name: "   ".into(),
            description: "Heart".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get(FIELD_NAME), Some("Category name is required."));
    }

    #[test]
    fn payload_is_trimmed_and_blank_description_dropped() {
        let payload = CategoryForm {
            name: " Cardiology ".into(),
            description: "  ".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(payload.name, "Cardiology");
        assert_eq!(payload.description, None);
    }

    #[test]
    fn ids_must_be_positive_numbers() {
        assert_eq!(parse_category_id("14"), Some(14));
        assert_eq!(parse_category_id("0"), None);
        assert_eq!(parse_category_id("abc"), None);
        assert_eq!(edit_href(3), "/categories/edit/3");
        assert_eq!(view_href(3), "/categories/view/3");
    }

    #[test]
    fn form_starts_from_existing_category() {
        let category = Category {
            id: 2,
            name: "Oncology".into(),
            description: None,
        };
        let form = CategoryForm::from(&category);
        assert_eq!(form.name, "Oncology");
        assert!(form.description.is_empty());
    }
}
