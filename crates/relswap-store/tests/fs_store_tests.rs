// Integration tests for reading build directories from disk

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{temp_root, BuildFixture};
use relswap_core::{ArtifactStore, ChunkKind, ExErrorKind, UnitId};
use relswap_store::{FsArtifactStore, UnitBuilder};
use std::fs;

#[test]
fn test_read_version_from_resource_file() {
    let root = temp_root();
    let build = BuildFixture::new(root.path(), "v1", "shop", "1.2.3");
    let store = FsArtifactStore::new("shop");

    assert_eq!(store.read_version(&build.dir).unwrap(), "1.2.3");
}

#[test]
fn test_resource_for_other_app_is_rejected() {
    let root = temp_root();
    let build = BuildFixture::new(root.path(), "v1", "shop", "1.2.3");
    fs::rename(
        build.dir.join("ebin/shop.app"),
        build.dir.join("ebin/cart.app"),
    )
    .unwrap();

    let err = FsArtifactStore::new("cart").read_version(&build.dir).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ArtifactRead);
    assert!(err.message().contains("describes application shop"));
}

#[test]
fn test_missing_resource_file() {
    let root = temp_root();
    let build = BuildFixture::new(root.path(), "v1", "shop", "1");

    let err = FsArtifactStore::new("other").read_version(&build.dir).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ArtifactRead);
}

#[test]
fn test_resource_without_vsn() {
    let root = temp_root();
    let build = BuildFixture::new(root.path(), "v1", "shop", "1");
    fs::write(build.dir.join("ebin/shop.app"), "{application, shop, []}.\n").unwrap();

    let err = FsArtifactStore::new("shop").read_version(&build.dir).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ArtifactRead);
    assert!(err.message().contains("no version"));
}

#[test]
fn test_list_units_ignores_other_files() {
    let root = temp_root();
    let build = BuildFixture::new(root.path(), "v1", "shop", "1");
    build.unit("cart", "c", "d", &[]).unit("checkout", "c", "d", &[]);
    fs::write(build.dir.join("ebin/notes.txt"), "x").unwrap();

    let ids = FsArtifactStore::new("shop").list_unit_ids(&build.dir).unwrap();

    let ids: Vec<&str> = ids.iter().map(UnitId::as_str).collect();
    assert_eq!(ids, vec!["cart", "checkout"]);
}

#[test]
fn test_read_unit_extracts_chunks_and_references() {
    let root = temp_root();
    let build = BuildFixture::new(root.path(), "v1", "shop", "1");
    build.unit("cart", "code", "dbg", &["lists", "checkout", "cart"]);

    let unit = FsArtifactStore::new("shop")
        .read_unit(&build.dir, &UnitId::from("cart"))
        .unwrap();

    assert_eq!(unit.chunk(&ChunkKind::from("Code")), Some(&b"code"[..]));
    assert_eq!(unit.chunk(&ChunkKind::debug_info()), Some(&b"dbg"[..]));
    let refs: Vec<&str> = unit.references().iter().map(UnitId::as_str).collect();
    assert_eq!(refs, vec!["checkout", "lists"]);
}

#[test]
fn test_unit_declaring_another_name() {
    let root = temp_root();
    let build = BuildFixture::new(root.path(), "v1", "shop", "1");
    build.raw("cart", &UnitBuilder::new("basket").build());

    let err = FsArtifactStore::new("shop")
        .read_unit(&build.dir, &UnitId::from("cart"))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ArtifactRead);
    assert_eq!(err.unit_id(), Some("cart"));
}

#[test]
fn test_corrupt_unit() {
    let root = temp_root();
    let build = BuildFixture::new(root.path(), "v1", "shop", "1");
    build.raw("cart", b"not a container at all");

    let err = FsArtifactStore::new("shop")
        .read_unit(&build.dir, &UnitId::from("cart"))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ArtifactRead);
    assert!(err.path().unwrap().ends_with("cart.beam"));
}

#[test]
fn test_unit_without_atom_table() {
    let root = temp_root();
    let build = BuildFixture::new(root.path(), "v1", "shop", "1");
    build.raw("cart", &UnitBuilder::new("cart").without_atoms().build());

    let err = FsArtifactStore::new("shop")
        .read_unit(&build.dir, &UnitId::from("cart"))
        .unwrap_err();

    assert!(err.message().contains("no atom table"));
}

#[test]
fn test_missing_ebin_directory() {
    let root = temp_root();

    let err = FsArtifactStore::new("shop")
        .list_unit_ids(&root.path().join("nowhere"))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Io);
}
