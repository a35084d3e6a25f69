//! Integration tests for the Okta client and generators using wiremock
//!
//! These tests run generators end-to-end against a mocked Okta org,
//! covering pagination, auth headers, error statuses and fail-fast runs.

use okta_discover::generators::{
    BrandGenerator, DomainGenerator, EmailDomainGenerator, LogStreamGenerator,
    ProfileMappingGenerator,
};
use okta_discover::okta::{LegacyApi, ManagementApi, OktaClient, OktaService};
use okta_discover::resource::{run_generators, Generator};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn client_for(server: &MockServer) -> OktaClient {
    OktaClient::new(&server.uri(), TOKEN).expect("client should build")
}

fn service_for(server: &MockServer) -> OktaService {
    OktaService::from_client(client_for(server))
}

/// Test module for the HTTP client surfaces
mod client_tests {
    use super::*;

    /// Requests carry the SSWS authorization header
    #[tokio::test]
    async fn test_list_brands_sends_ssws_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/brands"))
            .and(header("authorization", "SSWS test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "bnd1", "name": "Acme", "emailDomainId": "OeD1" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let brands = client_for(&server).list_brands().await.unwrap();

        assert_eq!(brands.len(), 1);
        assert_eq!(brands[0].email_domain_id.as_deref(), Some("OeD1"));
    }

    /// Link headers with rel="next" are followed until exhausted
    #[tokio::test]
    async fn test_pagination_follows_link_header() {
        let server = MockServer::start().await;
        let next = format!("{}/api/v1/realms?after=guo2", server.uri());

        Mock::given(method("GET"))
            .and(path("/api/v1/realms"))
            .and(query_param("after", "guo2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "id": "guo3" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/realms"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", format!("<{}>; rel=\"next\"", next).as_str())
                    .set_body_json(json!([{ "id": "guo1" }, { "id": "guo2" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let realms = client_for(&server).list_realms().await.unwrap();

        let ids: Vec<&str> = realms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["guo1", "guo2", "guo3"]);
    }

    /// Role listings follow `_links.next.href` in the body
    #[tokio::test]
    async fn test_role_pagination_follows_body_links() {
        let server = MockServer::start().await;
        let next = format!("{}/api/v1/iam/roles?after=cr1", server.uri());

        Mock::given(method("GET"))
            .and(path("/api/v1/iam/roles"))
            .and(query_param("after", "cr1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "roles": [ { "id": "cr2", "label": "Help Desk" } ],
                "_links": {}
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/iam/roles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "roles": [ { "id": "cr1", "label": "Auditor" } ],
                "_links": { "next": { "href": next } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let roles = client_for(&server).list_roles().await.unwrap();

        let ids: Vec<&str> = roles.roles.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["cr1", "cr2"]);
    }

    /// Legacy domain listing unwraps the `domains` envelope
    #[tokio::test]
    async fn test_legacy_domain_listing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/domains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "domains": [ { "id": "OcD1", "domain": "login.acme.com" } ]
            })))
            .mount(&server)
            .await;

        let domains = client_for(&server).list_domains().await.unwrap();
        assert_eq!(domains.domains[0].domain, "login.acme.com");
    }

    /// Non-2xx statuses surface as errors
    #[tokio::test]
    async fn test_403_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/features"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "errorCode": "E0000006",
                "errorSummary": "You do not have permission to perform the requested action"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).list_features().await.unwrap_err();
        assert!(err.to_string().contains("403"));
    }
}

/// Test module for generators running against the mock org
mod generator_tests {
    use super::*;

    #[tokio::test]
    async fn test_brand_generator_end_to_end() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/brands"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "bnd1", "name": "Acme Corp" }
            ])))
            .mount(&server)
            .await;

        let resources = BrandGenerator::new(service_for(&server))
            .init_resources()
            .await
            .unwrap();

        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].internal_name(), "bnd1_acme_corp");
        assert_eq!(resources[0].provider_tag(), "okta");
    }

    #[tokio::test]
    async fn test_email_domain_expands_brands() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/brands"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "bnd1", "name": "Acme" }
            ])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/email-domains"))
            .and(query_param("expand", "brands"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "OeD1",
                "displayName": "Acme Mail",
                "domain": "mail.acme.com",
                "_embedded": { "brands": [ { "id": "bnd1", "name": "Acme" } ] }
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let resources = EmailDomainGenerator::new(service_for(&server))
            .init_resources()
            .await
            .unwrap();

        assert_eq!(resources[0].attribute("brand_id"), Some("bnd1"));
    }

    #[tokio::test]
    async fn test_domain_listing_failure_returns_no_descriptors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/domains"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = DomainGenerator::new(service_for(&server))
            .init_resources()
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.operation, "listing domains");
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_unknown_log_stream_type_skipped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/logStreams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "0oaX", "name": "New", "type": "some_future_type", "settings": {} },
                {
                    "id": "0oaS",
                    "name": "Splunk",
                    "type": "splunk_cloud_logstreaming",
                    "status": "ACTIVE",
                    "settings": { "edition": "aws", "host": "acme.splunkcloud.com" }
                }
            ])))
            .mount(&server)
            .await;

        let resources = LogStreamGenerator::new(service_for(&server))
            .init_resources()
            .await
            .unwrap();

        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].external_id(), "0oaS");
    }

    #[tokio::test]
    async fn test_profile_mapping_detail_404_aborts() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/mappings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "prm1", "source": { "id": "s", "name": "user" }, "target": { "id": "t", "name": "app" } }
            ])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/mappings/prm1"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = ProfileMappingGenerator::new(service_for(&server))
            .init_resources()
            .await
            .unwrap_err();

        assert_eq!(err.id.as_deref(), Some("prm1"));
        assert!(err.to_string().starts_with("error getting profile mapping prm1"));
    }

    #[tokio::test]
    async fn test_run_generators_collects_across_services() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/captchas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "cap1", "name": "Prod" }
            ])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/iam/roles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "roles": [ { "id": "cr0a", "label": "Auditor" } ]
            })))
            .mount(&server)
            .await;

        let resources = run_generators(&["captcha", "role"], &service_for(&server))
            .await
            .unwrap();

        let kinds: Vec<&str> = resources.iter().map(|r| r.resource_kind()).collect();
        assert_eq!(kinds, ["okta_captcha", "okta_admin_role_custom"]);
    }
}
