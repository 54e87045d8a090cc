use std::collections::BTreeMap;

use super::domain::{Material, MaterialId};

/// Lookup of material reference data.
pub trait MaterialCatalog: Send + Sync {
    fn material(&self, id: &MaterialId) -> Option<Material>;
    fn materials(&self) -> Vec<Material>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("material {0} is listed more than once")]
    DuplicateMaterial(MaterialId),
    #[error("material {id} must award a positive number of points per unit (found {points_per_unit})")]
    InvalidPoints { id: MaterialId, points_per_unit: f64 },
    #[error("material {id} daily cap must be positive (found {cap})")]
    InvalidDailyCap { id: MaterialId, cap: f64 },
}

/// Immutable in-memory catalog, listed by category then id.
#[derive(Debug, Clone)]
pub struct StaticMaterialCatalog {
    materials: BTreeMap<MaterialId, Material>,
}

impl StaticMaterialCatalog {
    pub fn new(materials: Vec<Material>) -> Result<Self, CatalogError> {
        let mut indexed = BTreeMap::new();
        for material in materials {
            if !(material.points_per_unit.is_finite() && material.points_per_unit > 0.0) {
                return Err(CatalogError::InvalidPoints {
                    id: material.id,
                    points_per_unit: material.points_per_unit,
                });
            }
            if let Some(cap) = material.max_quantity_per_day {
                if !(cap.is_finite() && cap > 0.0) {
                    return Err(CatalogError::InvalidDailyCap {
                        id: material.id,
                        cap,
                    });
                }
            }
            if indexed.contains_key(&material.id) {
                return Err(CatalogError::DuplicateMaterial(material.id));
            }
            indexed.insert(material.id.clone(), material);
        }

        Ok(Self { materials: indexed })
    }

    /// The eight materials accepted at collection points.
    pub fn standard() -> Self {
        let materials = [
            ("1", "Garrafa PET", "Plástico", "Garrafas de refrigerante, água e sucos", 5.0, 10.0),
            ("2", "Lata de Alumínio", "Metal", "Latas de refrigerante e sucos", 8.0, 10.0),
            ("3", "Papel Alumínio", "Metal", "Papel alumínio usado em lanches e marmitas", 6.0, 5.0),
            ("4", "Papel", "Papel", "Folhas de caderno, papel sulfite, papel toalha", 2.0, 50.0),
            ("5", "Papelão", "Papel", "Caixas de lanche, embalagens de pizza, caixas", 3.0, 5.0),
            ("6", "Copo Plástico", "Plástico", "Copos descartáveis de água, suco e refrigerante", 4.0, 15.0),
            ("7", "Embalagem Plástica", "Plástico", "Saquinhos de salgadinho, biscoito, embalagens de lanche", 3.0, 10.0),
            ("8", "Sacola Plástica", "Plástico", "Sacolas de supermercado e sacolinhas", 2.0, 20.0),
        ]
        .into_iter()
        .map(|(id, name, category, description, points, cap)| {
            let material = Material {
                id: MaterialId(id.to_string()),
                name: name.to_string(),
                category: category.to_string(),
                description: description.to_string(),
                points_per_unit: points,
                max_quantity_per_day: Some(cap),
            };
            (material.id.clone(), material)
        })
        .collect();

        Self { materials }
    }
}

impl MaterialCatalog for StaticMaterialCatalog {
    fn material(&self, id: &MaterialId) -> Option<Material> {
        self.materials.get(id).cloned()
    }

    fn materials(&self) -> Vec<Material> {
        let mut listed: Vec<Material> = self.materials.values().cloned().collect();
        listed.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.id.cmp(&b.id)));
        listed
    }
}
