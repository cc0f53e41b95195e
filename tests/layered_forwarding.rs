// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end forwarding across the layers of a small service.

use std::collections::HashMap;
use std::io;

use klib::error::testing::{assert_chain_ids, assert_error_matches};
use klib::error::{UNKNOWN_ERROR_ID, codec};
use klib::{Error, ErrorChain, ErrorCode, ForwardExt, StringHandler, forward_error};
use klib::util::HandlerPipeline;

const REPO_FIND: &str = "3b8f1c2e-repo-find";
const SERVICE_RENAME: &str = "7d2a9e41-service-rename";
const HANDLER_RENAME: &str = "a41c07d5-handler-rename";

struct Repo {
    users: HashMap<u32, String>,
    offline: bool,
}

impl Repo {
    fn find(&self, id: u32) -> Result<String, ErrorChain> {
        if self.offline {
            return Err::<String, io::Error>(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))
            .forward(REPO_FIND);
        }
        self.users.get(&id).cloned().ok_or_else(|| {
            Error::new()
                .with_id("0f4e-user-missing")
                .with_status(404)
                .with_code(ErrorCode::NotFound)
                .with_path("user.id")
                .into()
        })
    }
}

fn rename(repo: &Repo, id: u32, new_name: &str) -> Result<String, ErrorChain> {
    let old = repo.find(id).forward(SERVICE_RENAME)?;
    let pipeline = HandlerPipeline::new()
        .stage("trim", |s: &str| -> Result<String, ErrorChain> { Ok(s.trim().to_string()) })
        .stage("validate-name", |s: &str| -> Result<String, ErrorChain> {
            if s.is_empty() {
                Err(Error::new()
                    .with_id("name-empty")
                    .with_status(400)
                    .with_code(ErrorCode::MissingValue)
                    .with_path("name")
                    .into())
            } else {
                Ok(s.to_string())
            }
        });
    let new = pipeline.handle(new_name).forward(SERVICE_RENAME)?;
    Ok(format!("{old} -> {new}"))
}

fn handler(repo: &Repo, id: u32, new_name: &str) -> Result<String, ErrorChain> {
    rename(repo, id, new_name).map_err(|chain| forward_error(HANDLER_RENAME, chain))
}

fn repo(offline: bool) -> Repo {
    Repo {
        users: HashMap::from([(1, "ada".to_string())]),
        offline,
    }
}

#[test]
fn success_passes_through() {
    assert_eq!(handler(&repo(false), 1, "  grace ").unwrap(), "ada -> grace");
}

#[test]
fn structured_not_found_keeps_innermost_record() {
    let chain = handler(&repo(false), 2, "grace").unwrap_err();
    assert_chain_ids(&chain, &["0f4e-user-missing", SERVICE_RENAME, HANDLER_RENAME]);
    assert_error_matches(
        chain.first().unwrap(),
        &Error::new()
            .with_id("0f4e-user-missing")
            .with_status(404)
            .with_code(ErrorCode::NotFound)
            .with_path("user.id"),
    );
}

#[test]
fn foreign_io_failure_is_synthesised() {
    let chain = handler(&repo(true), 1, "grace").unwrap_err();
    assert_chain_ids(
        &chain,
        &[UNKNOWN_ERROR_ID, REPO_FIND, SERVICE_RENAME, HANDLER_RENAME],
    );
    assert_eq!(chain.first().unwrap().cause.as_deref(), Some("connection refused"));
}

#[test]
fn handler_failure_records_stage_and_layers() {
    let chain = handler(&repo(false), 1, "   ").unwrap_err();
    assert_chain_ids(
        &chain,
        &["name-empty", "validate-name", SERVICE_RENAME, HANDLER_RENAME],
    );
    assert!(
        chain
            .iter()
            .skip(1)
            .all(|e| e.has_code(ErrorCode::ForwardedError))
    );
}

#[test]
fn chains_survive_the_wire() {
    let chain = handler(&repo(false), 2, "grace").unwrap_err();
    let decoded = codec::chain_from_cbor(&codec::chain_to_cbor(&chain).unwrap()).unwrap();
    assert_eq!(decoded, chain);
    assert_eq!(decoded.to_string(), chain.to_string());
}

#[test]
fn codec_failures_forward_as_structured_records() {
    let chain = codec::from_json("{not json").forward("decode-request").unwrap_err();
    assert_eq!(chain.len(), 2);
    assert!(chain.first().unwrap().has_code(ErrorCode::SerializationError));
}
