/// Number of timestamp bytes embedded in a COMB GUID.
pub(crate) const TIMESTAMP_BYTES: usize = 6;

/// Number of random bytes in a COMB GUID.
pub(crate) const RANDOM_BYTES: usize = 10;

/// Database engines with distinct index-comparison rules for 16-byte GUIDs.
///
/// Each engine compares stored GUIDs in its own byte order, so the position
/// of the embedded timestamp has to differ per engine for inserts to land
/// in index order. Both the timestamp placement and the full comparison
/// order live in one table per variant ([`Self::timestamp_positions`] and
/// the significance order behind [`Self::sort_key`]); the two are checked
/// against each other at compile time.
///
/// Positions are expressed in RFC byte order, the order the hyphenated
/// string form reads in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbEngine {
    /// `BINARY(16)` (via `UUID_TO_BIN` without swapping) or `CHAR(36)`
    /// columns: bytes compare left to right in string order, so the
    /// timestamp leads.
    MySql,
    /// `RAW(16)` columns hold the GUID struct's memory dump: the first
    /// 4-byte group is reversed and the two 2-byte groups are byte-swapped,
    /// comparison is left to right over the stored form.
    Oracle,
    /// `uniqueidentifier` compares the trailing 6-byte group first (byte 10
    /// most significant), then works toward the front in the documented
    /// SqlGuid group order.
    SqlServer,
}

impl DbEngine {
    /// Every engine variant.
    pub const ALL: [DbEngine; 3] = [DbEngine::MySql, DbEngine::Oracle, DbEngine::SqlServer];

    /// Where the 6 timestamp bytes land, most significant first.
    pub(crate) const fn timestamp_positions(self) -> [usize; TIMESTAMP_BYTES] {
        match self {
            DbEngine::MySql => [0, 1, 2, 3, 4, 5],
            DbEngine::Oracle => [3, 2, 1, 0, 5, 4],
            DbEngine::SqlServer => [10, 11, 12, 13, 14, 15],
        }
    }

    /// The engine's comparison order over RFC byte indices, most
    /// significant first.
    pub(crate) const fn significance(self) -> [usize; 16] {
        match self {
            DbEngine::MySql => [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
            DbEngine::Oracle => [3, 2, 1, 0, 5, 4, 7, 6, 8, 9, 10, 11, 12, 13, 14, 15],
            DbEngine::SqlServer => [10, 11, 12, 13, 14, 15, 8, 9, 7, 6, 5, 4, 3, 2, 1, 0],
        }
    }

    /// Permutes `bytes` into this engine's comparison order.
    ///
    /// Lexicographically comparing two sort keys gives exactly the order
    /// the engine's index would store the two values in. Useful for
    /// client-side sorting and for verifying ordering behavior in tests.
    pub fn sort_key(self, bytes: &[u8; 16]) -> [u8; 16] {
        let order = self.significance();
        let mut key = [0u8; 16];
        for (slot, &pos) in key.iter_mut().zip(order.iter()) {
            *slot = bytes[pos];
        }
        key
    }
}

// Every table must be a permutation of 0..16 whose six most significant
// entries are exactly the timestamp positions. A mismatch fails the build.
const _: () = {
    let mut e = 0;
    while e < DbEngine::ALL.len() {
        let engine = DbEngine::ALL[e];
        let order = engine.significance();
        let ts = engine.timestamp_positions();

        let mut seen = [false; 16];
        let mut i = 0;
        while i < 16 {
            assert!(order[i] < 16);
            assert!(!seen[order[i]], "duplicate byte index in significance");
            seen[order[i]] = true;
            i += 1;
        }

        let mut j = 0;
        while j < TIMESTAMP_BYTES {
            assert!(
                order[j] == ts[j],
                "timestamp must occupy the most significant comparison slots"
            );
            j += 1;
        }

        e += 1;
    }
};
