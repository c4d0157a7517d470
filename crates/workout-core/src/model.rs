use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A categoria registered in the store. `nome` is unique across all rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categoria {
    pub id: Uuid,
    pub nome: String,
}

impl Categoria {
    /// Builds a categoria with a freshly generated identifier. The id is
    /// assigned once, before the insert, and never changes afterwards.
    pub fn new(nome: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            nome: nome.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_distinct_ids() {
        let a = Categoria::new("Hipertrofia");
        let b = Categoria::new("Resistência");
        assert_ne!(a.id, b.id);
        assert_eq!(a.nome, "Hipertrofia");
    }

    #[test]
    fn serializes_with_domain_field_names() {
        let categoria = Categoria::new("Força");
        let json = serde_json::to_value(&categoria).unwrap();
        assert_eq!(json["nome"], "Força");
        assert!(json["id"].is_string());
    }
}
