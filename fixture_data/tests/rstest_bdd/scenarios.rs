//! Binds the data provider feature file to the step registry.

use rstest_bdd_macros::scenarios;

use crate::fixtures::{ProviderContext, provider_context};

scenarios!(
    "tests/features/data_provider.feature",
    fixtures = [provider_context: ProviderContext]
);
