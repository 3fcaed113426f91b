//! Integration tests for the command implementations.

use std::path::PathBuf;

use serde_json::{Value, json};

use viewstate_cli::cli::{ApplyArgs, DecodeArgs, DecodeFormatArg, EncodeArgs};
use viewstate_cli::commands::{load_state, load_view, run_apply, run_decode, run_encode};
use viewstate_model::ViewState;

fn data(name: &str) -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data")).join(name)
}

fn view() -> PathBuf {
    data("issues.view.json")
}

#[test]
fn test_encode_initial_state() {
    let token = run_encode(&EncodeArgs {
        view: view(),
        state: None,
    })
    .unwrap();
    insta::assert_snapshot!(token, @"filter(status:open)fields(title,updated)");
}

#[test]
fn test_encode_state_file() {
    let token = run_encode(&EncodeArgs {
        view: view(),
        state: Some(data("issues.state.json")),
    })
    .unwrap();
    insta::assert_snapshot!(
        token,
        @"search(title,((crash%20(linux))))filter(assignee:sam,labels:((*(bug)(p1))))fields(title,updated:desc)pos(100,50)"
    );
}

#[test]
fn test_apply_restores_state_file() {
    let view_definition = load_view(&view()).unwrap();
    let expected = load_state(Some(data("issues.state.json").as_path()), &view_definition).unwrap();
    let token = run_encode(&EncodeArgs {
        view: view(),
        state: Some(data("issues.state.json")),
    })
    .unwrap();

    let output = run_apply(&ApplyArgs {
        view: view(),
        state: None,
        soft: false,
        token,
    })
    .unwrap();
    let applied: ViewState = serde_json::from_str(&output).unwrap();

    assert_eq!(applied.search, expected.search);
    assert_eq!(applied.filters, expected.filters);
    assert_eq!(applied.fields, expected.fields);
    assert_eq!((applied.offset, applied.limit), (Some(100), 50));
}

#[test]
fn test_apply_soft_keeps_default_filters() {
    let apply = |soft| {
        let output = run_apply(&ApplyArgs {
            view: view(),
            state: None,
            soft,
            token: "search(title,bug)".to_string(),
        })
        .unwrap();
        serde_json::from_str::<ViewState>(&output).unwrap()
    };

    assert_eq!(apply(true).enabled_filter_ids(), vec!["status"]);
    assert!(apply(false).enabled_filter_ids().is_empty());
}

#[test]
fn test_decode_json_output() {
    let output = run_decode(&DecodeArgs {
        view: view(),
        format: DecodeFormatArg::Json,
        token: "filter(labels:((*(a)(b))))pos(0,10)".to_string(),
    })
    .unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        value,
        json!({
            "filters": {"labels": {"enabled": true, "value": ["a", "b"]}},
            "offset": 0,
            "limit": 10
        })
    );
}

#[test]
fn test_decode_table_output() {
    let output = run_decode(&DecodeArgs {
        view: view(),
        format: DecodeFormatArg::Table,
        token: "search(title,crash)fields(updated:asc)".to_string(),
    })
    .unwrap();
    assert!(output.contains("crash"));
    assert!(output.contains("updated"));
    assert!(output.contains("asc"));
}

#[test]
fn test_errors_carry_context() {
    let error = run_decode(&DecodeArgs {
        view: view(),
        format: DecodeFormatArg::Table,
        token: "order(title)".to_string(),
    })
    .unwrap_err();
    assert_eq!(error.to_string(), "decode query token");
    assert!(format!("{error:#}").contains("unknown section 'order'"));

    let error = run_encode(&EncodeArgs {
        view: data("missing.view.json"),
        state: None,
    })
    .unwrap_err();
    assert!(error.to_string().starts_with("load view definition"));
}
