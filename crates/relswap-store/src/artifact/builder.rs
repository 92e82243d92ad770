//! Container encoder for fixtures and tooling

use crate::artifact::container::padded;
use crate::artifact::symbols::{encode_compact_len, ATOMS_LATIN1, ATOMS_UTF8, IMPORTS};

/// Builds the bytes of a compiled unit container.
///
/// The atom table starts with the unit name followed by every atom the
/// imports mention, in first-use order. Extra chunks follow the atom and
/// import tables in the order they were added.
///
/// # Example
///
/// ```
/// use relswap_store::artifact::{parse_container, UnitBuilder};
///
/// let bytes = UnitBuilder::new("my_mod")
///     .import("lists", "map", 2)
///     .chunk("Code", b"\x00\x01")
///     .build();
/// assert!(parse_container(&bytes).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct UnitBuilder {
    name: String,
    imports: Vec<(String, String, u32)>,
    chunks: Vec<(String, Vec<u8>)>,
    legacy_atoms: bool,
    with_atoms: bool,
    with_imports: bool,
}

impl UnitBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
            chunks: Vec::new(),
            legacy_atoms: false,
            with_atoms: true,
            with_imports: true,
        }
    }

    /// Record a call into `module:function/arity`.
    pub fn import(mut self, module: &str, function: &str, arity: u32) -> Self {
        self.imports
            .push((module.to_string(), function.to_string(), arity));
        self
    }

    /// Append a chunk with the given 4-character tag.
    pub fn chunk(mut self, tag: &str, data: &[u8]) -> Self {
        self.chunks.push((tag.to_string(), data.to_vec()));
        self
    }

    /// Write a Latin-1 `Atom` table with one-byte lengths instead of `AtU8`.
    pub fn legacy_atoms(mut self) -> Self {
        self.legacy_atoms = true;
        self
    }

    /// Omit the atom table entirely.
    pub fn without_atoms(mut self) -> Self {
        self.with_atoms = false;
        self
    }

    /// Omit the import table entirely.
    pub fn without_imports(mut self) -> Self {
        self.with_imports = false;
        self
    }

    fn atom_list(&self) -> Vec<&str> {
        let mut atoms: Vec<&str> = vec![self.name.as_str()];
        for (module, function, _) in &self.imports {
            for atom in [module.as_str(), function.as_str()] {
                if !atoms.contains(&atom) {
                    atoms.push(atom);
                }
            }
        }
        atoms
    }

    fn atom_index(atoms: &[&str], atom: &str) -> u32 {
        atoms
            .iter()
            .position(|a| *a == atom)
            .map_or(0, |i| i as u32 + 1)
    }

    /// Encode the container.
    ///
    /// # Panics
    ///
    /// Panics if an atom is longer than 2047 bytes, or longer than 255
    /// bytes with [`legacy_atoms`](Self::legacy_atoms).
    pub fn build(&self) -> Vec<u8> {
        let atoms = self.atom_list();
        let mut chunks: Vec<(&str, Vec<u8>)> = Vec::new();

        if self.with_atoms {
            let mut table = Vec::new();
            if self.legacy_atoms {
                table.extend_from_slice(&(atoms.len() as i32).to_be_bytes());
                for atom in &atoms {
                    let len = u8::try_from(atom.len())
                        .unwrap_or_else(|_| panic!("atom {atom} too long for a legacy table"));
                    table.push(len);
                    table.extend_from_slice(atom.as_bytes());
                }
                chunks.push((ATOMS_LATIN1, table));
            } else {
                table.extend_from_slice(&(-(atoms.len() as i32)).to_be_bytes());
                for atom in &atoms {
                    let len = encode_compact_len(atom.len())
                        .unwrap_or_else(|| panic!("atom {atom} too long to encode"));
                    table.extend_from_slice(&len);
                    table.extend_from_slice(atom.as_bytes());
                }
                chunks.push((ATOMS_UTF8, table));
            }
        }

        if self.with_imports {
            let mut table = Vec::new();
            table.extend_from_slice(&(self.imports.len() as u32).to_be_bytes());
            for (module, function, arity) in &self.imports {
                table.extend_from_slice(&Self::atom_index(&atoms, module).to_be_bytes());
                table.extend_from_slice(&Self::atom_index(&atoms, function).to_be_bytes());
                table.extend_from_slice(&arity.to_be_bytes());
            }
            chunks.push((IMPORTS, table));
        }

        for (tag, data) in &self.chunks {
            chunks.push((tag.as_str(), data.clone()));
        }

        let mut body = Vec::new();
        body.extend_from_slice(b"BEAM");
        for (tag, data) in chunks {
            let mut tag_bytes = [b' '; 4];
            for (slot, byte) in tag_bytes.iter_mut().zip(tag.bytes()) {
                *slot = byte;
            }
            body.extend_from_slice(&tag_bytes);
            body.extend_from_slice(&(data.len() as u32).to_be_bytes());
            body.extend_from_slice(&data);
            body.resize(body.len() + padded(data.len()) - data.len(), 0);
        }

        let mut out = Vec::with_capacity(body.len() + 8);
        out.extend_from_slice(b"FOR1");
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
        out.extend_from_slice(&body);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_is_deterministic() {
        let builder = UnitBuilder::new("m").import("x", "f", 1).chunk("Code", b"abc");
        assert_eq!(builder.build(), builder.build());
    }

    #[test]
    fn test_chunks_are_padded() {
        let bytes = UnitBuilder::new("m")
            .without_atoms()
            .without_imports()
            .chunk("Code", b"abcde")
            .build();

        // header 12 + chunk header 8 + 5 bytes padded to 8
        assert_eq!(bytes.len(), 28);
        assert_eq!(&bytes[25..28], &[0, 0, 0]);
    }
}
