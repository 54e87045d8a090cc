use std::collections::BTreeMap;

use super::domain::{Reward, RewardCategory, RewardId};

/// Reward reference data, listed by id.
#[derive(Debug, Clone)]
pub struct StaticRewardCatalog {
    rewards: BTreeMap<RewardId, Reward>,
}

impl StaticRewardCatalog {
    pub fn new(rewards: Vec<Reward>) -> Self {
        Self {
            rewards: rewards
                .into_iter()
                .map(|reward| (reward.id.clone(), reward))
                .collect(),
        }
    }

    pub fn standard() -> Self {
        let rewards = [
            ("1", "Garrafa Plástica 500ml", "Garrafa squeeze de plástico resistente com tampa", 200.0, 150),
            ("2", "Garrafa Plástica 1L", "Garrafa grande de plástico para água ou suco", 300.0, 100),
            ("3", "Copo Plástico Reutilizável", "Copo de plástico resistente com tampa e canudo", 150.0, 200),
            ("4", "Kit 6 Copos Plásticos", "Conjunto com 6 copos coloridos de plástico resistente", 400.0, 80),
            ("5", "Porta Copos Plástico", "Porta copos de plástico com 4 unidades", 180.0, 120),
            ("6", "Prato Plástico Reutilizável", "Prato fundo de plástico resistente", 120.0, 150),
            ("7", "Kit 6 Pratos Plásticos", "Conjunto com 6 pratos de plástico coloridos", 350.0, 90),
            ("8", "Pote Plástico 500ml", "Pote hermético de plástico para alimentos", 180.0, 140),
            ("9", "Kit 3 Potes Plásticos", "Conjunto com 3 potes de tamanhos diferentes", 400.0, 100),
            ("10", "Tigela Plástica", "Tigela grande de plástico para saladas e frutas", 220.0, 110),
        ]
        .into_iter()
        .map(|(id, name, description, points_required, stock)| Reward {
            id: RewardId(id.to_string()),
            name: name.to_string(),
            description: description.to_string(),
            points_required,
            category: RewardCategory::Plastico,
            stock,
        })
        .collect();

        Self::new(rewards)
    }

    pub fn reward(&self, id: &RewardId) -> Option<&Reward> {
        self.rewards.get(id)
    }

    pub fn rewards(&self) -> impl Iterator<Item = &Reward> {
        self.rewards.values()
    }
}
