use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

const KIB: u64 = 1 << 10;
const MIB: u64 = 1 << 20;
const GIB: u64 = 1 << 30;
const TIB: u64 = 1 << 40;

/// Running totals of the work done by a traversal.
///
/// Only `files`, `dirs` and `bytes` are folded by [`Add`]; `trees` and `blobs`
/// are carried as plain data and never accumulated through a report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stat {
    pub files: u64,
    pub dirs: u64,
    pub bytes: u64,
    pub trees: u64,
    pub blobs: u64,
}

impl Stat {
    /// Delta for a single file of the given size
    pub fn file(size: u64) -> Self {
        Self {
            files: 1,
            bytes: size,
            ..Self::default()
        }
    }

    /// Delta for a single directory
    pub fn dir() -> Self {
        Self {
            dirs: 1,
            ..Self::default()
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Human readable size of `bytes`, see [`format_bytes`]
    pub fn format_bytes(&self) -> String {
        format_bytes(self.bytes)
    }
}

impl AddAssign for Stat {
    fn add_assign(&mut self, other: Stat) {
        self.bytes += other.bytes;
        self.dirs += other.dirs;
        self.files += other.files;
    }
}

impl Add for Stat {
    type Output = Stat;

    fn add(mut self, other: Stat) -> Stat {
        self += other;
        self
    }
}

impl Sum for Stat {
    fn sum<I: Iterator<Item = Stat>>(iter: I) -> Stat {
        iter.fold(Stat::default(), Add::add)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stat({} files, {} dirs, {})",
            self.files,
            self.dirs,
            self.format_bytes()
        )
    }
}

/// Formats a byte count with binary units.
///
/// Thresholds are strict, so a value of exactly one unit is rendered with the
/// next smaller unit (`1024` is `"1024B"`, `1 << 30` is `"1024.000 MiB"`).
pub fn format_bytes(bytes: u64) -> String {
    let b = bytes as f64;

    match bytes {
        n if n > TIB => format!("{:.3} TiB", b / TIB as f64),
        n if n > GIB => format!("{:.3} GiB", b / GIB as f64),
        n if n > MIB => format!("{:.3} MiB", b / MIB as f64),
        n if n > KIB => format!("{:.3} KiB", b / KIB as f64),
        n => format!("{}B", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_small_values() {
        assert_eq!(format_bytes(0), "0B");
        assert_eq!(format_bytes(500), "500B");
        assert_eq!(format_bytes(1024), "1024B");
    }

    #[test]
    fn test_format_scaled_values() {
        assert_eq!(format_bytes(2048), "2.000 KiB");
        assert_eq!(format_bytes(3 * MIB / 2), "1.500 MiB");
        assert_eq!(format_bytes(GIB + 1), "1.000 GiB");
        assert_eq!(format_bytes(5 * TIB), "5.000 TiB");
    }

    #[test]
    fn test_format_boundary_is_strict() {
        // Exactly one GiB stays below the GiB bucket
        assert_eq!(format_bytes(GIB), "1024.000 MiB");
        assert_eq!(format_bytes(TIB), "1024.000 GiB");
    }

    #[test]
    fn test_display() {
        let stat = Stat {
            files: 3,
            dirs: 2,
            bytes: 2048,
            ..Stat::default()
        };
        assert_eq!(stat.to_string(), "Stat(3 files, 2 dirs, 2.000 KiB)");
        assert_eq!(Stat::default().to_string(), "Stat(0 files, 0 dirs, 0B)");
    }

    #[test]
    fn test_add_skips_trees_and_blobs() {
        let a = Stat {
            files: 1,
            dirs: 2,
            bytes: 3,
            trees: 4,
            blobs: 5,
        };
        let b = Stat {
            files: 10,
            dirs: 20,
            bytes: 30,
            trees: 40,
            blobs: 50,
        };

        let sum = a + b;
        assert_eq!(sum.files, 11);
        assert_eq!(sum.dirs, 22);
        assert_eq!(sum.bytes, 33);
        assert_eq!(sum.trees, 4);
        assert_eq!(sum.blobs, 5);
    }

    #[test]
    fn test_add_is_commutative_on_reportable_fields() {
        let a = Stat::file(100);
        let b = Stat::dir() + Stat::file(7);
        assert_eq!(a + b, b + a);
        assert_eq!((a + b) + Stat::dir(), a + (b + Stat::dir()));
    }

    #[test]
    fn test_sum() {
        let total: Stat = vec![Stat::file(10), Stat::dir(), Stat::file(5)]
            .into_iter()
            .sum();
        assert_eq!(total.files, 2);
        assert_eq!(total.dirs, 1);
        assert_eq!(total.bytes, 15);
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_string(&Stat::file(42)).unwrap();
        assert_eq!(
            json,
            r#"{"files":1,"dirs":0,"bytes":42,"trees":0,"blobs":0}"#
        );
    }
}
