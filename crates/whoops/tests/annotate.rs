// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Annotating errors as they travel up through layers of a service.

use std::error::Error as StdError;
use std::io;
use std::thread;

use http::StatusCode;
use whoops::{Annotated, Located, Message, Probe, ResultExt, locate, wrap_codef, wrap_showf, wrapf};

fn read_settings() -> Result<String, io::Error> {
    Err(io::Error::new(io::ErrorKind::PermissionDenied, "settings.toml is not readable"))
}

fn load() -> Result<String, Annotated> {
    read_settings().annotate()
}

fn start() -> Result<String, Annotated> {
    load().annotate()
}

#[test]
fn annotation_happens_once_across_layers() {
    let from_load = load().unwrap_err();
    let from_start = start().unwrap_err();

    assert_eq!(from_load.location(), from_start.location());
    assert!(from_start.location().file.ends_with("annotate.rs"));
}

#[test]
fn original_error_is_recoverable() {
    let err = start().unwrap_err();

    let io = err.into_cause().downcast::<io::Error>().unwrap();
    assert_eq!(io.kind(), io::ErrorKind::PermissionDenied);
}

#[test]
fn chain_can_be_walked_to_the_root() {
    let err = wrap_codef!(StatusCode::SERVICE_UNAVAILABLE, cause = locate(read_settings().unwrap_err()), "loading settings");

    let chain: Vec<String> = std::iter::successors(Some(&err as &(dyn StdError + 'static)), |&e| e.source())
        .map(ToString::to_string)
        .collect();

    assert_eq!(chain.len(), 4);
    assert!(chain[1].starts_with("loading settings: "));
    assert!(chain[2].ends_with(" :: settings.toml is not readable"));
    assert_eq!(chain[3], "settings.toml is not readable");

    let middle = err.source().unwrap();
    assert!(middle.is::<Message>());
    assert!(middle.source().unwrap().is::<Located>());
}

#[test]
fn probe_reads_annotations_through_wrappers() {
    let probe = Probe::default();
    let inner = wrap_showf!("quota exceeded");
    let expected_id = inner.id().clone();
    let expected_location = inner.location();

    let wrapped = locate(locate(inner));

    assert_eq!(probe.find_show(&wrapped), Some("quota exceeded"));
    assert_eq!(probe.find_code(&wrapped), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(probe.find_id(&wrapped), Some(expected_id.as_str()));
    assert_eq!(probe.find_location(&wrapped), Some(expected_location));
}

#[test]
fn concurrent_annotation_is_independent() {
    let errors: Vec<Annotated> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|n| scope.spawn(move || wrapf!("worker {n} failed"))).collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    for (n, err) in errors.iter().enumerate() {
        assert_eq!(err.cause().to_string(), format!("worker {n} failed"));
    }

    let mut ids: Vec<_> = errors.iter().map(|err| err.id().as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), errors.len());
}
