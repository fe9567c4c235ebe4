//! Step definitions for the data provider scenarios.

use anyhow::{Result, anyhow, ensure};
use fixture_data::{FixtureError, MergePrecedence};
use rstest_bdd_macros::{given, then, when};
use test_helpers::text::{split_list, unquote};

use crate::fixtures::ProviderContext;

#[given("the sample fixtures")]
fn sample_fixtures(provider_context: &ProviderContext) -> Result<()> {
    ensure!(
        provider_context.tree.is_empty(),
        "fixture tree already initialised"
    );
    provider_context.install_samples()
}

#[given("merge precedence is {policy}")]
fn merge_precedence(provider_context: &ProviderContext, policy: String) -> Result<()> {
    let precedence: MergePrecedence =
        serde_json::from_value(serde_json::Value::String(unquote(&policy).to_owned()))?;
    provider_context.precedence.set(precedence);
    Ok(())
}

#[given("the fixture {class} holds a {account} record with password {password}")]
fn single_record_fixture(
    provider_context: &ProviderContext,
    class: String,
    account: String,
    password: String,
) -> Result<()> {
    let json = serde_json::json!({
        "checkoutTest": [{"accountType": account, "password": password}]
    });
    provider_context.write_fixture(&class, &json.to_string())
}

#[given("a malformed fixture named {class}")]
fn malformed_fixture(provider_context: &ProviderContext, class: String) -> Result<()> {
    provider_context.write_fixture(&class, "{\"anyTest\": [")
}

#[when("the records for {class} {method} are read")]
fn read_records(provider_context: &ProviderContext, class: String, method: String) -> Result<()> {
    let provider = provider_context.provider()?;
    match provider.records(&class, &method) {
        Ok(records) => provider_context.records.set(
            records
                .map(|result| result.map_err(|err| err.to_string()))
                .collect(),
        ),
        Err(err) => provider_context.load_error.set(err),
    }
    Ok(())
}

#[when("{class} {method} is run")]
fn run_method(provider_context: &ProviderContext, class: String, method: String) -> Result<()> {
    let provider = provider_context.provider()?;
    let report = provider
        .run(&class, &method, |_| Ok::<(), String>(()))
        .map_err(|err| anyhow!(err.to_string()))?;
    provider_context.report.set(report);
    Ok(())
}

#[then("{count} records are produced")]
fn record_count(provider_context: &ProviderContext, count: usize) -> Result<()> {
    let produced = provider_context
        .records
        .with_ref(Vec::len)
        .ok_or_else(|| anyhow!("records have not been read"))?;
    ensure!(produced == count, "expected {count} records, got {produced}");
    Ok(())
}

#[then("record {index} logs in as {username} with password {password}")]
fn record_credentials(
    provider_context: &ProviderContext,
    index: usize,
    username: String,
    password: String,
) -> Result<()> {
    let (actual_user, actual_password) = provider_context.with_record(index, |data| {
        (
            data.username().map(str::to_owned),
            data.password().map(str::to_owned),
        )
    })?;
    ensure!(
        actual_user.as_deref() == Some(username.as_str()),
        "expected username {username}, got {actual_user:?}"
    );
    ensure!(
        actual_password.as_deref() == Some(password.as_str()),
        "expected password {password}, got {actual_password:?}"
    );
    Ok(())
}

#[then("record {index} orders {products}")]
fn record_products(provider_context: &ProviderContext, index: usize, products: String) -> Result<()> {
    let expected = split_list(&products);
    let actual = provider_context.with_record(index, |data| data.products().to_vec())?;
    ensure!(actual == expected, "expected {expected:?}, got {actual:?}");
    Ok(())
}

#[then("record {index} ships to postal code {code}")]
fn record_postal_code(provider_context: &ProviderContext, index: usize, code: String) -> Result<()> {
    let actual = provider_context.with_record(index, |data| {
        data.customer_info()
            .and_then(|info| info.postal_code())
            .map(str::to_owned)
    })?;
    ensure!(
        actual.as_deref() == Some(code.as_str()),
        "expected postal code {code}, got {actual:?}"
    );
    Ok(())
}

#[then("no invocation happens")]
fn no_invocation(provider_context: &ProviderContext) -> Result<()> {
    let report = provider_context
        .report
        .take()
        .ok_or_else(|| anyhow!("no run report recorded"))?;
    ensure!(report.invocations() == 0, "expected no invocations");
    ensure!(report.is_success(), "an empty run must succeed");
    Ok(())
}

#[then("loading fails with a parse error")]
fn parse_failure(provider_context: &ProviderContext) -> Result<()> {
    ensure!(
        provider_context.records.is_empty(),
        "records were produced from a malformed fixture"
    );
    let err = provider_context
        .load_error
        .take()
        .ok_or_else(|| anyhow!("expected a load error"))?;
    ensure!(
        matches!(err.as_ref(), FixtureError::Parse { .. }),
        "expected a parse error, got {err:?}"
    );
    Ok(())
}
