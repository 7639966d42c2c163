// SPDX-License-Identifier: MIT OR Apache-2.0
//! Share demultiplexer: partitions a history into the base log and one
//! log per share ID.

use std::collections::BTreeMap;

use coffer_format::split_share_prefix;

/// A history partitioned by share ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemuxedHistory {
    /// Lines without a share prefix, in order.
    pub base: Vec<String>,
    /// Per-share lines, prefix stripped, in order.
    pub shares: BTreeMap<String, Vec<String>>,
}

/// Partition a history by share prefix. Order is preserved per bucket.
pub fn demux_history<S: AsRef<str>>(history: &[S]) -> DemuxedHistory {
    let mut demuxed = DemuxedHistory::default();
    for line in history {
        let line = line.as_ref();
        match split_share_prefix(line) {
            (Some(share_id), command) => demuxed
                .shares
                .entry(share_id.to_string())
                .or_default()
                .push(command.to_string()),
            (None, _) => demuxed.base.push(line.to_string()),
        }
    }
    demuxed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demux_scenario() {
        let share = "SSSSSSSS-SSSS-SSSS-SSSS-SSSSSSSSSSSS";
        let history = [
            "cgr 0 G1".to_string(),
            format!("${share} cen G1 E1"),
            "cmm hello".to_string(),
        ];
        let demuxed = demux_history(&history);
        assert_eq!(demuxed.base, ["cgr 0 G1", "cmm hello"]);
        assert_eq!(demuxed.shares.len(), 1);
        assert_eq!(demuxed.shares[share], ["cen G1 E1"]);
    }

    #[test]
    fn test_demux_preserves_order_per_bucket() {
        let a = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa";
        let b = "bbbbbbbb-bbbb-bbbb-bbbb-bbbbbbbbbbbb";
        let history = [
            format!("${a} cgr 0 g1"),
            "aid v1".to_string(),
            format!("${b} cgr 0 g2"),
            format!("${a} cen g1 e1"),
            "fmt coffer/a".to_string(),
        ];
        let demuxed = demux_history(&history);
        assert_eq!(demuxed.base, ["aid v1", "fmt coffer/a"]);
        assert_eq!(demuxed.shares[a], ["cgr 0 g1", "cen g1 e1"]);
        assert_eq!(demuxed.shares[b], ["cgr 0 g2"]);
    }

    #[test]
    fn test_demux_empty_history() {
        let demuxed = demux_history::<String>(&[]);
        assert!(demuxed.base.is_empty());
        assert!(demuxed.shares.is_empty());
    }
}
