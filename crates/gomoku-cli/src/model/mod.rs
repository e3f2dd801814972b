pub(crate) mod population_model;
