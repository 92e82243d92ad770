//! Atom and import tables

use crate::artifact::container::{read_u32, Container, ContainerError};
use std::collections::BTreeSet;

/// UTF-8 atom table
pub const ATOMS_UTF8: &str = "AtU8";
/// Latin-1 atom table written by older compilers
pub const ATOMS_LATIN1: &str = "Atom";
pub const IMPORTS: &str = "ImpT";

/// Read one unsigned compact-term length.
///
/// Only the small (4-bit) and medium (11-bit) forms appear in atom tables.
fn read_compact_len(data: &[u8], pos: &mut usize) -> Result<usize, ContainerError> {
    let first = *data
        .get(*pos)
        .ok_or_else(|| ContainerError::AtomTable("length runs past end".to_string()))?;
    *pos += 1;

    if first & 0b111 != 0 {
        return Err(ContainerError::AtomTable(format!(
            "length tag {} is not an unsigned literal",
            first & 0b111
        )));
    }
    if first & 0b1000 == 0 {
        return Ok((first >> 4) as usize);
    }
    if first & 0b1_0000 == 0 {
        let second = *data
            .get(*pos)
            .ok_or_else(|| ContainerError::AtomTable("length runs past end".to_string()))?;
        *pos += 1;
        return Ok((((first & 0b1110_0000) as usize) << 3) | second as usize);
    }
    Err(ContainerError::AtomTable(
        "extended length encoding is not supported".to_string(),
    ))
}

/// Encode an unsigned compact-term length; `None` above the medium form.
pub(crate) fn encode_compact_len(len: usize) -> Option<Vec<u8>> {
    if len < 16 {
        Some(vec![(len << 4) as u8])
    } else if len < 2048 {
        Some(vec![
            (((len >> 3) & 0b1110_0000) | 0b1000) as u8,
            (len & 0xff) as u8,
        ])
    } else {
        None
    }
}

/// Atom names in table order; index 0 holds atom 1, the unit's own name.
///
/// # Errors
///
/// `MissingAtomTable` if neither table is present, `AtomTable` if the table
/// is truncated or not valid text.
pub fn atoms(container: &Container) -> Result<Vec<String>, ContainerError> {
    let (data, utf8) = match (container.chunk(ATOMS_UTF8), container.chunk(ATOMS_LATIN1)) {
        (Some(data), _) => (data, true),
        (None, Some(data)) => (data, false),
        (None, None) => return Err(ContainerError::MissingAtomTable),
    };

    let raw = read_u32(data, 0)
        .ok_or_else(|| ContainerError::AtomTable("missing count".to_string()))?
        as i32;
    let compact = raw < 0;
    let count = raw.unsigned_abs() as usize;

    let mut names = Vec::with_capacity(count.min(data.len()));
    let mut pos = 4;
    for index in 1..=count {
        let len = if compact {
            read_compact_len(data, &mut pos)?
        } else {
            let len = *data.get(pos).ok_or_else(|| {
                ContainerError::AtomTable(format!("atom {} length runs past end", index))
            })?;
            pos += 1;
            len as usize
        };
        let bytes = data.get(pos..pos + len).ok_or_else(|| {
            ContainerError::AtomTable(format!("atom {} runs past end", index))
        })?;
        pos += len;

        let name = if utf8 {
            String::from_utf8(bytes.to_vec())
                .map_err(|_| ContainerError::AtomTable(format!("atom {} is not UTF-8", index)))?
        } else {
            bytes.iter().map(|b| *b as char).collect()
        };
        names.push(name);
    }

    Ok(names)
}

/// Distinct modules named by the import table, excluding the unit itself.
///
/// A container without an import table imports nothing.
///
/// # Errors
///
/// `ImportTable` if the table is truncated or refers to atoms that do not exist.
pub fn imported_modules(
    container: &Container,
    atoms: &[String],
) -> Result<BTreeSet<String>, ContainerError> {
    let Some(data) = container.chunk(IMPORTS) else {
        return Ok(BTreeSet::new());
    };

    let count = read_u32(data, 0)
        .ok_or_else(|| ContainerError::ImportTable("missing count".to_string()))?
        as usize;

    let mut modules = BTreeSet::new();
    for entry in 0..count {
        let at = 4 + entry * 12;
        let module = read_u32(data, at)
            .filter(|_| data.len() >= at + 12)
            .ok_or_else(|| ContainerError::ImportTable(format!("entry {} runs past end", entry)))?
            as usize;
        let name = module
            .checked_sub(1)
            .and_then(|i| atoms.get(i))
            .ok_or_else(|| {
                ContainerError::ImportTable(format!(
                    "entry {} names atom {} of {}",
                    entry,
                    module,
                    atoms.len()
                ))
            })?;
        modules.insert(name.clone());
    }

    if let Some(own) = atoms.first() {
        modules.remove(own);
    }
    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{parse_container, UnitBuilder};

    #[test]
    fn test_compact_len_forms() {
        for len in [0usize, 1, 15, 16, 255, 300, 2047] {
            let encoded = encode_compact_len(len).unwrap();
            let mut pos = 0;
            assert_eq!(read_compact_len(&encoded, &mut pos).unwrap(), len);
            assert_eq!(pos, encoded.len());
        }
        assert_eq!(encode_compact_len(2048), None);
    }

    #[test]
    fn test_medium_form_bytes() {
        // 300 = 0b1_0010_1100
        assert_eq!(encode_compact_len(300), Some(vec![0b0010_1000, 0b0010_1100]));
    }

    #[test]
    fn test_atoms_and_imports() {
        let bytes = UnitBuilder::new("mod_a")
            .import("lists", "map", 2)
            .import("mod_b", "run", 0)
            .import("lists", "foldl", 3)
            .import("mod_a", "local", 1)
            .build();
        let container = parse_container(&bytes).unwrap();

        let names = atoms(&container).unwrap();
        assert_eq!(names[0], "mod_a");

        let modules = imported_modules(&container, &names).unwrap();
        let modules: Vec<&str> = modules.iter().map(String::as_str).collect();
        assert_eq!(modules, vec!["lists", "mod_b"]);
    }

    #[test]
    fn test_legacy_atom_table() {
        let bytes = UnitBuilder::new("old_mod")
            .legacy_atoms()
            .import("other", "f", 0)
            .build();
        let container = parse_container(&bytes).unwrap();

        assert!(container.chunk(ATOMS_LATIN1).is_some());
        let names = atoms(&container).unwrap();
        assert_eq!(names[0], "old_mod");
        assert!(imported_modules(&container, &names)
            .unwrap()
            .contains("other"));
    }

    #[test]
    fn test_missing_import_table_is_empty() {
        let bytes = UnitBuilder::new("leaf").without_imports().build();
        let container = parse_container(&bytes).unwrap();
        let names = atoms(&container).unwrap();

        assert!(imported_modules(&container, &names).unwrap().is_empty());
    }

    #[test]
    fn test_missing_atom_table() {
        let bytes = UnitBuilder::new("x").without_atoms().build();
        let container = parse_container(&bytes).unwrap();

        assert_eq!(atoms(&container), Err(ContainerError::MissingAtomTable));
    }

    #[test]
    fn test_import_index_out_of_range() {
        let mut imports = Vec::new();
        imports.extend_from_slice(&1u32.to_be_bytes());
        imports.extend_from_slice(&9u32.to_be_bytes());
        imports.extend_from_slice(&1u32.to_be_bytes());
        imports.extend_from_slice(&0u32.to_be_bytes());
        let bytes = UnitBuilder::new("m")
            .without_imports()
            .chunk(IMPORTS, &imports)
            .build();
        let container = parse_container(&bytes).unwrap();
        let names = atoms(&container).unwrap();

        assert!(matches!(
            imported_modules(&container, &names),
            Err(ContainerError::ImportTable(_))
        ));
    }
}
