//! Shared fixtures for the behavioural scenarios.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use fixture_data::accounts::DEFAULT_ACCOUNT_COLUMN;
use fixture_data::{
    AccountTable, DataProvider, FixtureError, FixtureStore, InvocationReport, MergePrecedence,
    TestData,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use test_helpers::fixtures::FixtureTree;

const ACCOUNTS_CSV: &str = include_str!("../data/accounts.csv");
const LOGIN_TEST: &str = include_str!("../data/LoginTest.json");
const PRODUCT_ORDER_TEST: &str = include_str!("../data/ProductOrderTest.json");

/// State shared between the steps of one scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct ProviderContext {
    pub tree: Slot<FixtureTree>,
    pub precedence: Slot<MergePrecedence>,
    pub records: Slot<Vec<Result<TestData, String>>>,
    pub report: Slot<InvocationReport>,
    pub load_error: Slot<Arc<FixtureError>>,
}

impl ProviderContext {
    /// Write the sample fixtures and accounts into a fresh tree.
    pub fn install_samples(&self) -> Result<()> {
        let tree = FixtureTree::new()?;
        tree.write_accounts(ACCOUNTS_CSV)?;
        tree.write_fixture("LoginTest", LOGIN_TEST)?;
        tree.write_fixture("ProductOrderTest", PRODUCT_ORDER_TEST)?;
        self.tree.set(tree);
        Ok(())
    }

    /// Write `json` as the fixture for `class`.
    pub fn write_fixture(&self, class: &str, json: &str) -> Result<()> {
        self.tree
            .with_ref(|tree| tree.write_fixture(class, json).map(drop))
            .ok_or_else(|| anyhow!("fixture tree not initialised"))?
    }

    /// Build a provider over the scenario's tree.
    pub fn provider(&self) -> Result<DataProvider> {
        let precedence = self.precedence.get().unwrap_or_default();
        self.tree
            .with_ref(|tree| {
                let store = FixtureStore::open(tree.fixture_dir())?;
                let accounts = AccountTable::load(&tree.accounts_path(), DEFAULT_ACCOUNT_COLUMN)?;
                Ok::<_, Arc<FixtureError>>(
                    DataProvider::new(store, Arc::new(accounts)).with_precedence(precedence),
                )
            })
            .ok_or_else(|| anyhow!("fixture tree not initialised"))?
            .map_err(|err| anyhow!(err.to_string()))
    }

    /// Run `check` against the materialised record at `index`.
    pub fn with_record<T>(&self, index: usize, check: impl FnOnce(&TestData) -> T) -> Result<T> {
        self.records
            .with_ref(|records| match records.get(index) {
                Some(Ok(data)) => Ok(check(data)),
                Some(Err(err)) => Err(anyhow!("record {index} failed: {err}")),
                None => Err(anyhow!("no record at index {index}")),
            })
            .ok_or_else(|| anyhow!("records have not been read"))?
    }
}

/// Creates a clean context for each scenario.
#[fixture]
pub fn provider_context() -> ProviderContext {
    ProviderContext::default()
}
