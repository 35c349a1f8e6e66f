use crate::{Error, Result, SnowflakeId};

/// Usable bits in a Snowflake ID.
///
/// The most significant bit of the `u64` always stays clear so packed values
/// remain positive when stored in signed 64-bit database columns.
pub const USABLE_BITS: u32 = 63;

/// Bit allocation for the three Snowflake components.
///
/// A layout packs `timestamp | node | sequence` from most to least
/// significant, which makes packed values order first by time, then by node,
/// then by sequence. The three widths must sum to [`USABLE_BITS`].
///
/// # Example
///
/// ```
/// use chronoid::SnowflakeLayout;
///
/// // 39 ms-bits (~17 years), 16 nodes, plenty of sequence room.
/// let layout = SnowflakeLayout::new(39, 4, 20).unwrap();
/// assert_eq!(layout.max_node_id(), 15);
///
/// let id = layout.pack(1_000, 3, 7).unwrap();
/// let parts = layout.unpack(id);
/// assert_eq!((parts.timestamp, parts.node_id, parts.sequence), (1_000, 3, 7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnowflakeLayout {
    timestamp_bits: u32,
    node_bits: u32,
    sequence_bits: u32,
}

impl SnowflakeLayout {
    /// The classic allocation: 41 timestamp bits (roughly 69 years of
    /// milliseconds), 10 node bits (1024 nodes), 12 sequence bits (4096 IDs
    /// per node per millisecond).
    pub const DEFAULT: SnowflakeLayout = SnowflakeLayout {
        timestamp_bits: 41,
        node_bits: 10,
        sequence_bits: 12,
    };

    /// Creates a layout from explicit widths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] unless the widths sum to exactly 63
    /// and both `timestamp_bits` and `sequence_bits` are non-zero.
    /// `node_bits` may be zero for single-node deployments.
    pub const fn new(timestamp_bits: u32, node_bits: u32, sequence_bits: u32) -> Result<Self> {
        if timestamp_bits == 0
            || sequence_bits == 0
            || timestamp_bits > USABLE_BITS
            || node_bits > USABLE_BITS
            || sequence_bits > USABLE_BITS
            || timestamp_bits + node_bits + sequence_bits != USABLE_BITS
        {
            return Err(Error::InvalidLayout {
                timestamp_bits,
                node_bits,
                sequence_bits,
            });
        }
        Ok(Self {
            timestamp_bits,
            node_bits,
            sequence_bits,
        })
    }

    /// Width of the timestamp field in bits.
    pub const fn timestamp_bits(&self) -> u32 {
        self.timestamp_bits
    }

    /// Width of the node field in bits.
    pub const fn node_bits(&self) -> u32 {
        self.node_bits
    }

    /// Width of the sequence field in bits.
    pub const fn sequence_bits(&self) -> u32 {
        self.sequence_bits
    }

    /// Largest representable timestamp (milliseconds since the epoch).
    pub const fn max_timestamp(&self) -> u64 {
        mask(self.timestamp_bits)
    }

    /// Largest representable node ID.
    pub const fn max_node_id(&self) -> u64 {
        mask(self.node_bits)
    }

    /// Largest representable sequence number.
    pub const fn max_sequence(&self) -> u64 {
        mask(self.sequence_bits)
    }

    const fn node_shift(&self) -> u32 {
        self.sequence_bits
    }

    const fn timestamp_shift(&self) -> u32 {
        self.sequence_bits + self.node_bits
    }

    /// Packs the three components into an ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] naming the first component that exceeds
    /// its width. Bit 63 of a successfully packed value is always zero.
    pub fn pack(&self, timestamp: u64, node_id: u64, sequence: u64) -> Result<SnowflakeId> {
        if timestamp > self.max_timestamp() {
            return Err(Error::OutOfRange {
                field: "timestamp",
                value: timestamp,
                bits: self.timestamp_bits,
            });
        }
        if node_id > self.max_node_id() {
            return Err(Error::OutOfRange {
                field: "node_id",
                value: node_id,
                bits: self.node_bits,
            });
        }
        if sequence > self.max_sequence() {
            return Err(Error::OutOfRange {
                field: "sequence",
                value: sequence,
                bits: self.sequence_bits,
            });
        }

        let raw =
            (timestamp << self.timestamp_shift()) | (node_id << self.node_shift()) | sequence;
        Ok(SnowflakeId::from_u64(raw))
    }

    /// Unpacks an ID into its components. Exact inverse of [`Self::pack`]
    /// for every value `pack` can produce.
    pub const fn unpack(&self, id: SnowflakeId) -> SnowflakeParts {
        let raw = id.to_u64();
        SnowflakeParts {
            timestamp: (raw >> self.timestamp_shift()) & self.max_timestamp(),
            node_id: (raw >> self.node_shift()) & self.max_node_id(),
            sequence: raw & self.max_sequence(),
        }
    }
}

impl Default for SnowflakeLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const fn mask(bits: u32) -> u64 {
    if bits == 0 { 0 } else { (1u64 << bits) - 1 }
}

/// The unpacked components of a [`SnowflakeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnowflakeParts {
    /// Milliseconds since the generator's epoch.
    pub timestamp: u64,
    /// The generating node.
    pub node_id: u64,
    /// Intra-millisecond sequence number.
    pub sequence: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_widths() {
        let layout = SnowflakeLayout::DEFAULT;
        assert_eq!(layout.timestamp_bits(), 41);
        assert_eq!(layout.node_bits(), 10);
        assert_eq!(layout.sequence_bits(), 12);
        assert_eq!(layout.max_timestamp(), (1 << 41) - 1);
        assert_eq!(layout.max_node_id(), 1023);
        assert_eq!(layout.max_sequence(), 4095);
    }

    #[test]
    fn rejects_widths_not_summing_to_63() {
        for (t, n, s) in [(41, 10, 13), (41, 10, 11), (64, 0, 0), (0, 0, 0)] {
            assert_eq!(
                SnowflakeLayout::new(t, n, s).unwrap_err(),
                Error::InvalidLayout {
                    timestamp_bits: t,
                    node_bits: n,
                    sequence_bits: s,
                }
            );
        }
    }

    #[test]
    fn rejects_zero_width_timestamp_or_sequence() {
        assert!(SnowflakeLayout::new(0, 43, 20).is_err());
        assert!(SnowflakeLayout::new(43, 20, 0).is_err());
        // Zero node bits is a valid single-node layout.
        let layout = SnowflakeLayout::new(43, 0, 20).unwrap();
        assert_eq!(layout.max_node_id(), 0);
    }

    #[test]
    fn pack_unpack_roundtrip_at_boundaries() {
        let layouts = [
            SnowflakeLayout::DEFAULT,
            SnowflakeLayout::new(39, 4, 20).unwrap(),
            SnowflakeLayout::new(43, 0, 20).unwrap(),
            SnowflakeLayout::new(1, 61, 1).unwrap(),
        ];
        for layout in layouts {
            let timestamps = [0, 1, layout.max_timestamp() / 2, layout.max_timestamp()];
            let nodes = [0, layout.max_node_id() / 2, layout.max_node_id()];
            let sequences = [0, 1, layout.max_sequence() / 2, layout.max_sequence()];
            for &ts in &timestamps {
                for &node in &nodes {
                    for &seq in &sequences {
                        let id = layout.pack(ts, node, seq).unwrap();
                        let parts = layout.unpack(id);
                        assert_eq!(parts.timestamp, ts, "{layout:?}");
                        assert_eq!(parts.node_id, node, "{layout:?}");
                        assert_eq!(parts.sequence, seq, "{layout:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn sign_bit_stays_clear_at_maximums() {
        let layout = SnowflakeLayout::DEFAULT;
        let id = layout
            .pack(
                layout.max_timestamp(),
                layout.max_node_id(),
                layout.max_sequence(),
            )
            .unwrap();
        assert_eq!(id.to_u64() >> 63, 0);
        assert_eq!(id.to_u64(), u64::MAX >> 1);
    }

    #[test]
    fn pack_rejects_out_of_range_components() {
        let layout = SnowflakeLayout::DEFAULT;
        assert_eq!(
            layout.pack(1 << 41, 0, 0).unwrap_err(),
            Error::OutOfRange {
                field: "timestamp",
                value: 1 << 41,
                bits: 41,
            }
        );
        assert_eq!(
            layout.pack(0, 1024, 0).unwrap_err(),
            Error::OutOfRange {
                field: "node_id",
                value: 1024,
                bits: 10,
            }
        );
        assert_eq!(
            layout.pack(0, 0, 4096).unwrap_err(),
            Error::OutOfRange {
                field: "sequence",
                value: 4096,
                bits: 12,
            }
        );
    }

    #[test]
    fn packed_order_is_timestamp_major() {
        let layout = SnowflakeLayout::DEFAULT;
        let late = layout.pack(2, 0, 0).unwrap();
        let early_max = layout
            .pack(1, layout.max_node_id(), layout.max_sequence())
            .unwrap();
        assert!(late > early_max);

        let same_ms_later_seq = layout.pack(1, 0, 1).unwrap();
        let same_ms_earlier_seq = layout.pack(1, 0, 0).unwrap();
        assert!(same_ms_later_seq > same_ms_earlier_seq);
    }
}
