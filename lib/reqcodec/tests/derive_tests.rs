//! Integration tests for `#[derive(PathParams)]`.

#![allow(missing_docs)]

use assert2::{check, let_assert};
use reqcodec::prelude::*;
use reqcodec::GenericResponse;

#[derive(PathParams)]
struct Plain {
    id: u64,
    slug: String,
}

#[derive(PathParams)]
#[path_params(rename_all = "camelCase")]
struct SiteParams {
    site_id: u32,
    page_slug: String,
}

#[derive(PathParams)]
#[path_params(rename_all = "kebab-case")]
struct Mixed<'a> {
    org_name: &'a str,
    #[path_params(rename = "v")]
    api_version: f64,
}

#[derive(PathParams)]
#[path_params(rename_all = "SCREAMING-KEBAB-CASE")]
struct Shouting {
    api_version: u8,
    org_id: u32,
}

#[derive(PathParams)]
#[path_params(rename_all = "PascalCase")]
struct Pascal {
    org_id: u32,
}

#[derive(PathParams)]
#[path_params(rename_all = "SCREAMING_SNAKE_CASE")]
struct Snake {
    org_id: u32,
}

fn always_ok() -> impl RequestAdapter {
    adapter_fn(|request: GenericRequest| async move {
        GenericResponse::ok(serde_json::json!({ "url": request.url() }))
    })
}

#[derive(Debug, Deserialize)]
struct Echo {
    url: String,
}

#[test]
fn test_declared_names_follow_field_order() {
    assert_eq!(Plain::declared_names(), Some(&["id", "slug"][..]));
    assert_eq!(SiteParams::declared_names(), Some(&["siteId", "pageSlug"][..]));
    assert_eq!(Mixed::declared_names(), Some(&["org-name", "v"][..]));
}

#[test]
fn test_path_pairs_carry_values() {
    let params = SiteParams {
        site_id: 5,
        page_slug: "home".to_string(),
    };

    assert_eq!(
        params.path_pairs(),
        vec![
            ("siteId".to_string(), PathValue::from(5_u32)),
            ("pageSlug".to_string(), PathValue::from("home")),
        ]
    );
}

#[test]
fn test_derived_params_render_templates() {
    let template = PathTemplate::parse("/orgs/:org-name/api/:v");
    let params = Mixed {
        org_name: "acme",
        api_version: 2.0,
    };
    check!(template.render(&params) == "/orgs/acme/api/2");

    let template = PathTemplate::parse("/items/:id/:slug");
    let params = Plain {
        id: 7,
        slug: "seven".to_string(),
    };
    check!(template.render(&params) == "/items/7/seven");
}

#[tokio::test]
async fn test_derived_params_drive_a_codec() {
    let factory = CodecFactory::new(always_ok());
    let get_page = factory
        .get::<SiteParams, (), _>("/sites/:siteId/pages/:pageSlug", SerdeDecoder::<Echo>::new())
        .expect("names match");

    let params = SiteParams {
        site_id: 5,
        page_slug: "about".to_string(),
    };
    let echo = get_page.call(&params, &()).await.expect("ok");
    check!(echo.url == "/sites/5/pages/about");
}

#[test]
fn test_mismatched_template_is_rejected_at_construction() {
    let factory = CodecFactory::new(always_ok());
    let result = factory.get::<SiteParams, (), _>("/sites/:id", SerdeDecoder::<Echo>::new());

    let_assert!(Err(Error::ParamMismatch { missing, unexpected, .. }) = result);
    check!(missing == vec!["id".to_string()]);
    check!(unexpected == vec!["siteId".to_string(), "pageSlug".to_string()]);
}

#[tokio::test]
async fn test_every_case_convention_builds_a_codec() {
    let factory = CodecFactory::new(always_ok());

    let kebab = factory
        .get::<Mixed<'_>, (), _>("/orgs/:org-name/api/:v", SerdeDecoder::<Echo>::new())
        .expect("kebab names parse as markers");
    let params = Mixed {
        org_name: "acme",
        api_version: 3.0,
    };
    check!(kebab.call(&params, &()).await.expect("ok").url == "/orgs/acme/api/3");

    let shouting = factory
        .get::<Shouting, (), _>("/:API-VERSION/orgs/:ORG-ID", SerdeDecoder::<Echo>::new())
        .expect("screaming kebab names parse as markers");
    let params = Shouting {
        api_version: 1,
        org_id: 42,
    };
    check!(shouting.call(&params, &()).await.expect("ok").url == "/1/orgs/42");

    let pascal = factory
        .get::<Pascal, (), _>("/orgs/:OrgId", SerdeDecoder::<Echo>::new())
        .expect("pascal names parse as markers");
    check!(pascal.call(&Pascal { org_id: 7 }, &()).await.expect("ok").url == "/orgs/7");

    let snake = factory
        .get::<Snake, (), _>("/orgs/:ORG_ID", SerdeDecoder::<Echo>::new())
        .expect("screaming snake names parse as markers");
    check!(snake.call(&Snake { org_id: 8 }, &()).await.expect("ok").url == "/orgs/8");
}
