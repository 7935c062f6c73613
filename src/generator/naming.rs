/// Lower-case the first character: `OrderItem` → `orderItem`
pub fn lower_camel(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// English-ish pluralization used for collection URL segments
///
/// ```
/// use crudgen::generator::pluralize;
///
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("box"), "boxes");
/// assert_eq!(pluralize("widget"), "widgets");
/// ```
pub fn pluralize(word: &str) -> String {
    const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];
    if let Some(stem) = word.strip_suffix('y') {
        let before_y = stem.chars().last();
        if !before_y.is_some_and(|c| VOWELS.contains(&c)) {
            return format!("{stem}ies");
        }
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|end| word.ends_with(end)) {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// Names derived from one entity, shared by every artifact of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNames {
    /// Entity name as declared, e.g. `OrderItem`
    pub entity: String,
    /// `orderItem`
    pub lower_camel: String,
    /// `orderItems`
    pub plural: String,
    /// `ORDERITEM`, used in i18n message keys
    pub upper: String,
}

impl EntityNames {
    pub fn new(entity: &str) -> Self {
        let lower_camel = lower_camel(entity);
        EntityNames {
            entity: entity.to_string(),
            plural: pluralize(&lower_camel),
            upper: entity.to_uppercase(),
            lower_camel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_camel() {
        assert_eq!(lower_camel("Widget"), "widget");
        assert_eq!(lower_camel("OrderItem"), "orderItem");
        assert_eq!(lower_camel(""), "");
    }

    #[test]
    fn test_pluralize_rules() {
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("company"), "companies");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("match"), "matches");
        assert_eq!(pluralize("wish"), "wishes");
        assert_eq!(pluralize("quiz"), "quizes");
        assert_eq!(pluralize("orderItem"), "orderItems");
        assert_eq!(pluralize("y"), "ies");
    }

    #[test]
    fn test_entity_names() {
        let names = EntityNames::new("OrderItem");
        assert_eq!(names.lower_camel, "orderItem");
        assert_eq!(names.plural, "orderItems");
        assert_eq!(names.upper, "ORDERITEM");
    }
}
