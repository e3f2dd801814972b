use chrono::{DateTime, Utc};
use gomoku_evaluator::agent::Agent;
use gomoku_training::genetic::Population;
use serde::{Deserialize, Serialize};

/// A trained population as written by `train --output`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PopulationModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub generations: usize,
    /// Agents in rank order, best first.
    pub agents: Vec<RankedAgent>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankedAgent {
    pub rank: usize,
    /// Fitness from the last tournament; absent for freshly mutated offspring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness: Option<i32>,
    pub params: Agent,
}

impl PopulationModel {
    pub(crate) fn from_population(name: &str, generations: usize, population: &Population) -> Self {
        let offspring = population.offspring_range();
        let agents = population
            .individuals()
            .iter()
            .enumerate()
            .map(|(rank, ind)| RankedAgent {
                rank,
                fitness: (!offspring.contains(&rank)).then_some(ind.fitness()),
                params: ind.agent().clone(),
            })
            .collect();
        Self {
            name: name.to_owned(),
            trained_at: Utc::now(),
            generations,
            agents,
        }
    }

    /// Agents ordered by rank.
    pub(crate) fn into_agents(self) -> Vec<Agent> {
        let mut agents = self.agents;
        agents.sort_by_key(|a| a.rank);
        agents.into_iter().map(|a| a.params).collect()
    }
}

#[cfg(test)]
mod tests {
    use gomoku_evaluator::agent::PARAM_COUNT;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn test_model_json_layout() {
        let mut rng = Pcg64Mcg::seed_from_u64(8);
        let population = Population::random(3, &mut rng);
        let model = PopulationModel::from_population("test", 0, &population);

        let json = serde_json::to_value(&model).unwrap();
        let agents = json["agents"].as_array().unwrap();
        assert_eq!(agents.len(), 3);
        assert_eq!(agents[0]["fitness"], 0);
        assert!(agents[1].get("fitness").is_none());
        assert_eq!(agents[2]["rank"], 2);
        assert_eq!(agents[2]["params"].as_array().unwrap().len(), PARAM_COUNT);

        let parsed: PopulationModel = serde_json::from_value(json).unwrap();
        let expected: Vec<_> = population
            .individuals()
            .iter()
            .map(|ind| ind.agent().clone())
            .collect();
        assert_eq!(parsed.into_agents(), expected);
    }
}
