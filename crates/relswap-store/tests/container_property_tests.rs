// Property tests: malformed unit files are rejected, never panic

use proptest::prelude::*;
use relswap_store::artifact::{parse_container, symbols, UnitBuilder};
use relswap_store::term::{parse_terms, Term};

proptest! {
    #[test]
    fn prop_arbitrary_bytes_do_not_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        if let Ok(container) = parse_container(&bytes) {
            if let Ok(atoms) = symbols::atoms(&container) {
                let _ = symbols::imported_modules(&container, &atoms);
            }
        }
    }

    #[test]
    fn prop_truncated_container_rejected(cut in 1usize..64) {
        let bytes = UnitBuilder::new("mod_a")
            .import("mod_b", "f", 1)
            .chunk("Code", &[7u8; 40])
            .build();
        let cut = cut.min(bytes.len());
        prop_assert!(parse_container(&bytes[..bytes.len() - cut]).is_err());
    }

    #[test]
    fn prop_imports_survive_encoding(modules in prop::collection::btree_set("[a-z][a-z0-9_]{0,20}", 0..6)) {
        let mut builder = UnitBuilder::new("self_mod");
        for module in &modules {
            builder = builder.import(module, "run", 0);
        }
        let container = parse_container(&builder.build()).unwrap();
        let atoms = symbols::atoms(&container).unwrap();
        let mut expected = modules.clone();
        expected.remove("self_mod");
        prop_assert_eq!(symbols::imported_modules(&container, &atoms).unwrap(), expected);
    }

    #[test]
    fn prop_arbitrary_text_does_not_panic(src in "\\PC{0,64}") {
        let _ = parse_terms(&src);
    }

    #[test]
    fn prop_printed_atoms_reparse(name in "\\PC{0,16}") {
        let printed = format!("{}.", Term::atom(name.clone()));
        prop_assert_eq!(parse_terms(&printed).unwrap(), vec![Term::Atom(name)]);
    }
}
