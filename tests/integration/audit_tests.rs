//! Integration tests for the auditor
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! audit cycle end-to-end through the Coordinator.

use migration_audit::config::{AuditConfig, Credentials};
use migration_audit::crawler::{Coordinator, PageTarget};
use migration_audit::input::load_targets;
use migration_audit::issue::{AuditReport, IssueType};
use migration_audit::output::write_csv_report;
use std::io::Write;
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROD_HOST: &str =
    "lla-drupal-app-prod.salmonground-819df123.australiaeast.azurecontainerapps.io";

/// Creates a test configuration with short timeouts and fast retries
fn create_test_config(concurrency: usize) -> AuditConfig {
    let mut config = AuditConfig::default();
    config.crawler.concurrency = concurrency;
    config.http.timeout_ms = 2_000;
    config.http.max_retries = 0;
    config.http.retry_backoff_ms = 1;
    config
}

fn coordinator(config: &AuditConfig) -> Coordinator {
    Coordinator::new(config, Credentials::new("user", "pass")).expect("valid test config")
}

fn target(server: &MockServer, route: &str) -> PageTarget {
    let url = Url::parse(&format!("{}{}", server.uri(), route)).expect("mock server URL");
    PageTarget::new(route, url)
}

async fn serve_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn types(report: &AuditReport) -> Vec<IssueType> {
    report.issues().iter().map(|i| i.issue_type).collect()
}

#[tokio::test]
async fn test_missing_page_single_issue() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<main>placeholder</main>"))
        .mount(&mock_server)
        .await;

    let report = coordinator(&create_test_config(2))
        .run(&[target(&mock_server, "/gone")])
        .await;

    assert_eq!(types(&report), vec![IssueType::Page404]);
    assert_eq!(report.issues()[0].page_url, "/gone");
    assert_eq!(report.issues()[0].snippet, "GET returned 404");
}

#[tokio::test]
async fn test_legacy_link_and_placeholder_copy() {
    let mock_server = MockServer::start().await;
    let href = format!("https://{}/x", PROD_HOST);
    serve_page(
        &mock_server,
        "/about",
        &format!(
            r#"<html><body><main>
                <p>This is placeholder copy</p>
                <a href="{}">Old home</a>
            </main></body></html>"#,
            href
        ),
    )
    .await;

    let url = Url::parse(&format!("{}/about", mock_server.uri())).unwrap();
    let targets = vec![PageTarget::new("https://example.org/about", url)];
    let report = coordinator(&create_test_config(1)).run(&targets).await;

    assert_eq!(
        types(&report),
        vec![IssueType::LegacyHostLink, IssueType::PlaceholderText]
    );
    assert!(report
        .issues()
        .iter()
        .all(|i| i.page_url == "https://example.org/about"));
    assert!(report.issues()[0].snippet.contains(&href));
    assert!(report.issues()[1].snippet.contains("placeholder copy"));
}

#[tokio::test]
async fn test_timeout_after_retries_single_fetch_failed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<main>placeholder</main>")
                .set_delay(Duration::from_millis(1_500)),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(1);
    config.http.timeout_ms = 200;
    config.http.max_retries = 1;

    let report = coordinator(&config)
        .run(&[target(&mock_server, "/slow")])
        .await;

    assert_eq!(types(&report), vec![IssueType::FetchFailed]);
    assert!(report.issues()[0].snippet.contains("timed out"));
}

#[tokio::test]
async fn test_auth_failure_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(1);
    config.http.max_retries = 3;

    let report = coordinator(&config)
        .run(&[target(&mock_server, "/private")])
        .await;

    assert_eq!(types(&report), vec![IssueType::FetchFailed]);
    assert_eq!(report.issues()[0].snippet, "authentication failed (HTTP 401)");
}

#[tokio::test]
async fn test_server_error_is_fetch_failed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let report = coordinator(&create_test_config(1))
        .run(&[target(&mock_server, "/boom")])
        .await;

    assert_eq!(types(&report), vec![IssueType::FetchFailed]);
    assert_eq!(report.issues()[0].snippet, "status 500");
}

#[tokio::test]
async fn test_credentials_sent_on_fetch_and_probe() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<main><a href="/child">Child</a></main>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/child"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = coordinator(&create_test_config(1))
        .run(&[target(&mock_server, "/page")])
        .await;

    assert!(report.is_empty());
}

#[tokio::test]
async fn test_broken_internal_links() {
    let mock_server = MockServer::start().await;
    serve_page(
        &mock_server,
        "/page",
        r##"<main>
            <a href="/ok">Fine</a>
            <a href="/missing#top">Missing</a>
            <a href="/no-head">No head</a>
            <a href="#section">Jump</a>
            <a href="mailto:help@example.org">Mail</a>
            <a href="https://external.example.net/gone">Elsewhere</a>
        </main>"##,
    )
    .await;
    Mock::given(method("HEAD"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    // HEAD refused, GET succeeds
    Mock::given(method("HEAD"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let report = coordinator(&create_test_config(1))
        .run(&[target(&mock_server, "/page")])
        .await;

    assert_eq!(types(&report), vec![IssueType::BrokenLink]);
    assert_eq!(
        report.issues()[0].snippet,
        "\"Missing\" -> /missing#top (returned HTTP 404)"
    );
}

#[tokio::test]
async fn test_link_issues_grouped_by_kind() {
    let mock_server = MockServer::start().await;
    serve_page(
        &mock_server,
        "/page",
        &format!(
            r#"<main>
                <a href="/missing">Missing</a>
                <a href="https://www.lifeline.org.au/old">Old site</a>
                <a href="https://{}/x">Prod</a>
            </main>"#,
            PROD_HOST
        ),
    )
    .await;
    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let report = coordinator(&create_test_config(1))
        .run(&[target(&mock_server, "/page")])
        .await;

    assert_eq!(
        types(&report),
        vec![
            IssueType::LegacyHostLink,
            IssueType::RestrictedDomainLink,
            IssueType::BrokenLink,
        ]
    );
}

#[tokio::test]
async fn test_restricted_domain_links() {
    let mock_server = MockServer::start().await;
    serve_page(
        &mock_server,
        "/page",
        r#"<main>
            <a href="https://www.lifeline.org.au/get-help">Get help</a>
            <a href="https://give.lifeline.org.au/donate">Donate</a>
            <a href="https://toolkit.lifeline.org.au/">Toolkit</a>
            <a href="https://lifeline.org.au.example.net/">Lookalike</a>
        </main>"#,
    )
    .await;

    let report = coordinator(&create_test_config(1))
        .run(&[target(&mock_server, "/page")])
        .await;

    assert_eq!(
        types(&report),
        vec![
            IssueType::RestrictedDomainLink,
            IssueType::RestrictedDomainLink
        ]
    );
    assert!(report.issues()[0].snippet.contains("get-help"));
    assert!(report.issues()[1].snippet.contains("toolkit.lifeline.org.au"));
}

#[tokio::test]
async fn test_only_main_content_checked() {
    let mock_server = MockServer::start().await;
    serve_page(
        &mock_server,
        "/page",
        r#"<html><body>
            <nav><a href="/nav-missing">Menu</a> lorem ipsum</nav>
            <main><p>Real content</p></main>
            <footer><a href="https://www.lifeline.org.au/">Footer</a></footer>
        </body></html>"#,
    )
    .await;
    Mock::given(method("HEAD"))
        .and(path("/nav-missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = coordinator(&create_test_config(1))
        .run(&[target(&mock_server, "/page")])
        .await;

    assert!(report.is_empty());
}

#[tokio::test]
async fn test_whole_body_used_without_main() {
    let mock_server = MockServer::start().await;
    serve_page(
        &mock_server,
        "/bare",
        "<html><body><div>Lorem Ipsum dolor</div></body></html>",
    )
    .await;

    let report = coordinator(&create_test_config(1))
        .run(&[target(&mock_server, "/bare")])
        .await;

    assert_eq!(types(&report), vec![IssueType::PlaceholderText]);
}

#[tokio::test]
async fn test_input_order_preserved() {
    let mock_server = MockServer::start().await;

    // Earlier pages answer later so completion order is reversed
    for (route, delay) in [("/p1", 400), ("/p2", 200), ("/p3", 0)] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<main>placeholder</main>")
                    .set_delay(Duration::from_millis(delay)),
            )
            .mount(&mock_server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/p4"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let targets: Vec<PageTarget> = ["/p1", "/p2", "/p3", "/p4"]
        .iter()
        .map(|route| target(&mock_server, route))
        .collect();

    let report = coordinator(&create_test_config(4)).run(&targets).await;

    let urls: Vec<&str> = report.issues().iter().map(|i| i.page_url.as_str()).collect();
    assert_eq!(urls, vec!["/p1", "/p2", "/p3", "/p4"]);
    assert_eq!(report.pages_audited(), 4);
}

#[tokio::test]
async fn test_rerun_produces_same_report() {
    let mock_server = MockServer::start().await;
    serve_page(
        &mock_server,
        "/a",
        r#"<main>lorem ipsum <a href="/dead">Dead</a></main>"#,
    )
    .await;
    serve_page(&mock_server, "/b", "<main>All good</main>").await;
    Mock::given(method("HEAD"))
        .and(path("/dead"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;

    let targets = vec![target(&mock_server, "/a"), target(&mock_server, "/b")];
    let coordinator = coordinator(&create_test_config(2));

    let first = coordinator.run(&targets).await;
    let second = coordinator.run(&targets).await;

    assert_eq!(first, second);
    assert_eq!(
        types(&first),
        vec![IssueType::BrokenLink, IssueType::PlaceholderText]
    );
}

#[tokio::test]
async fn test_linked_pages_are_not_audited() {
    let mock_server = MockServer::start().await;
    serve_page(
        &mock_server,
        "/start",
        r#"<main><a href="/linked">Linked</a></main>"#,
    )
    .await;
    // Only probed, never fetched for content
    Mock::given(method("HEAD"))
        .and(path("/linked"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/linked"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<main>placeholder</main>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = coordinator(&create_test_config(1))
        .run(&[target(&mock_server, "/start")])
        .await;

    assert!(report.is_empty());
    assert_eq!(report.pages_audited(), 1);
}

#[tokio::test]
async fn test_csv_in_csv_out() {
    let mock_server = MockServer::start().await;
    serve_page(
        &mock_server,
        "/about",
        r#"<main><p>lorem ipsum</p><a href="/contact">Contact</a></main>"#,
    )
    .await;
    serve_page(&mock_server, "/clean", "<main>Nothing to see</main>").await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "Title,Link").unwrap();
    writeln!(input, "About,/about").unwrap();
    writeln!(input, "Blank,").unwrap();
    writeln!(input, "Clean,/clean").unwrap();
    writeln!(input, "Old,/old").unwrap();
    input.flush().unwrap();

    let base = Url::parse(&format!("{}/", mock_server.uri())).unwrap();
    let targets = load_targets(input.path(), Some(&base), None).unwrap();
    assert_eq!(targets.len(), 3);

    let report = coordinator(&create_test_config(3)).run(&targets).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("report.csv");
    write_csv_report(&output, &report).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        vec![
            "URL,Issue Type,Snippet",
            "/about,Broken link,\"\"\"Contact\"\" -> /contact (returned HTTP 404)\"",
            "/about,Placeholder text,\"Found \"\"lorem ipsum\"\" in \"\"lorem ipsum Contact\"\"\"",
            "/old,Page 404,GET returned 404",
        ]
    );
}
