use tracing::info;

// Adds automatic logging to test
mod test_utils {
    use std::fs;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_rates_mock_server(
        from: &str,
        to: &str,
        rate: f64,
        expected_calls: u64,
    ) -> MockServer {
        let mock_server = MockServer::start().await;
        let body = format!(r#"{{"amount": 1.0, "base": "{from}", "rates": {{"{to}": {rate}}}}}"#);

        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("from", from))
            .and(query_param("to", to))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(expected_calls)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(rates_url: &str, extra_provider: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
base_currency: "THB"
providers:
  frankfurter:
    base_url: {rates_url}
{extra_provider}
ledger:
  categories:
    - id: food
      name: Food
      type: expense
    - id: salary
      name: Salary
      type: income
  transactions:
    - id: t1
      amount: 30000
      type: income
      category_id: salary
      date: "2024-05-01"
    - id: t2
      amount: 800
      type: expense
      category_id: food
      date: "2024-05-02"
    - id: t3
      amount: 400
      type: expense
      date: "2024-05-03"
  budgets:
    - id: total
      amount: 1000
      month: 5
      year: 2024
    - id: food-budget
      category_id: food
      amount: 500
      month: 5
      year: 2024
"#
        );
        fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

#[test_log::test(tokio::test)]
async fn test_budget_progress_from_config() {
    use fintrack::core::aggregate::budget_report;
    use fintrack::core::config::AppConfig;
    use fintrack::core::model::Period;

    let config_file = test_utils::write_config("http://127.0.0.1:9", "");
    let config = AppConfig::load_from_path(config_file.path()).expect("Failed to load config");
    let may = Period::new(2024, 5).unwrap();

    let report = budget_report(&config.ledger, may);
    let total = report.total.expect("total budget");
    info!(progress = ?total.progress, "Total budget progress");
    assert_eq!(total.progress.spent, 1200.0);
    assert_eq!(total.progress.remaining, 0.0);
    assert_eq!(total.progress.percent_used, 120.0);

    assert_eq!(report.categories.len(), 1);
    let food = &report.categories[0].progress;
    assert_eq!(food.spent, 800.0);
    assert_eq!(food.remaining, 0.0);
    assert_eq!(food.percent_used, 160.0);
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_budgets_and_dashboard() {
    let config_file = test_utils::write_config("http://127.0.0.1:9", "");
    let config_path = config_file.path().to_str().unwrap();
    let may = Some("2024-05".parse().unwrap());

    let result = fintrack::run_command(fintrack::AppCommand::Budgets { period: may }, Some(config_path)).await;
    assert!(result.is_ok(), "Budgets failed with: {:?}", result.err());

    let result =
        fintrack::run_command(fintrack::AppCommand::Dashboard { period: may }, Some(config_path)).await;
    assert!(result.is_ok(), "Dashboard failed with: {:?}", result.err());

    let result = fintrack::run_command(fintrack::AppCommand::Transactions, Some(config_path)).await;
    assert!(result.is_ok(), "Transactions failed with: {:?}", result.err());

    let result = fintrack::run_command(fintrack::AppCommand::Categories, Some(config_path)).await;
    assert!(result.is_ok(), "Categories failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_convert_with_mock() {
    let mock_server = test_utils::create_rates_mock_server("USD", "THB", 36.5, 1).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "");

    let result = fintrack::run_command(
        fintrack::AppCommand::Convert {
            amount: 10.0,
            from: "USD".to_string(),
            to: "THB".to_string(),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_convert_upstream_failure_is_reported() {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    let config_file = test_utils::write_config(&mock_server.uri(), "");

    let result = fintrack::run_command(
        fintrack::AppCommand::Convert {
            amount: 10.0,
            from: "USD".to_string(),
            to: "EUR".to_string(),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    let err = result.expect_err("conversion should fail");
    let finance_err = err
        .downcast_ref::<fintrack::core::FinanceError>()
        .expect("typed finance error");
    assert!(matches!(finance_err, fintrack::core::FinanceError::Upstream(_)));
}

#[test_log::test(tokio::test)]
async fn test_cached_rates_reuse_single_upstream_call() {
    use fintrack::core::convert::CurrencyConverter;
    use fintrack::core::config::AppConfig;

    let mock_server = test_utils::create_rates_mock_server("USD", "EUR", 0.9, 1).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "    cache_ttl_secs: 300");
    let config = AppConfig::load_from_path(config_file.path()).expect("Failed to load config");

    let converter =
        CurrencyConverter::new(fintrack::providers::rate_provider(&config.providers.frankfurter));
    for _ in 0..3 {
        let result = converter.convert(100.0, "USD", "EUR").await.unwrap();
        assert_eq!(result.converted_amount, 90.0);
    }
}

#[test_log::test(tokio::test)]
async fn test_currencies_needs_no_config() {
    let result = fintrack::run_command(
        fintrack::AppCommand::Currencies,
        Some("/nonexistent/fintrack/config.yaml"),
    )
    .await;
    assert!(result.is_ok());
}
