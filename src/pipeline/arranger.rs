//! Section arrangement
//!
//! Flattens every toc-tagged block of a styleguide into one synthetic file,
//! sorted by [`compare_blocks`]. Blocks without a toc tag are dropped and
//! file boundaries are lost.

use super::version::compare_blocks;
use crate::types::{FileResult, Styleguide};

pub fn arrange_by_sections(styleguide: Styleguide, file_name: &str) -> Styleguide {
    let mut blocks: Vec<_> = styleguide
        .into_iter()
        .flat_map(|file| file.blocks)
        .filter(|block| block.has_toc())
        .collect();

    blocks.sort_by(compare_blocks);

    tracing::debug!(
        "Arranged {} toc-tagged blocks into {}",
        blocks.len(),
        file_name
    );

    Styleguide::new(vec![FileResult::new(file_name, blocks)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Block, TocTag};
    use serde_json::json;

    fn block(value: serde_json::Value) -> Block {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_merges_and_sorts_across_files() {
        let styleguide = Styleguide::new(vec![
            FileResult::new(
                "a.css",
                vec![
                    block(json!({ "name": "untagged" })),
                    block(json!({ "name": "second", "toc": { "major": 1, "id": "1.1.0" } })),
                ],
            ),
            FileResult::new(
                "b.css",
                vec![block(json!({ "name": "first", "toc": { "major": 1, "id": "1.0.0" } }))],
            ),
        ]);

        let arranged = arrange_by_sections(styleguide, "app.css");

        assert_eq!(arranged.len(), 1);
        let file = &arranged.files()[0];
        assert_eq!(file.file, "app.css");
        let ids: Vec<_> = file
            .blocks
            .iter()
            .map(|b| b.toc().map(|t| t.id))
            .collect();
        assert_eq!(ids, vec![Some("1.0.0".to_string()), Some("1.1.0".to_string())]);
    }

    #[test]
    fn test_orders_by_major_then_segments() {
        let styleguide = Styleguide::new(vec![FileResult::new(
            "a.css",
            vec![
                block(json!({ "toc": TocTag::new("2", "2.0.0").to_value() })),
                block(json!({ "toc": TocTag::new("1", "1.10.0").to_value() })),
                block(json!({ "toc": TocTag::new("1", "1.2.3").to_value() })),
            ],
        )]);

        let arranged = arrange_by_sections(styleguide, "app.css");
        let ids: Vec<_> = arranged.files()[0]
            .blocks
            .iter()
            .filter_map(|b| b.toc())
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["1.2.3", "1.10.0", "2.0.0"]);
    }

    #[test]
    fn test_no_tagged_blocks_still_yields_one_file() {
        let styleguide = Styleguide::new(vec![FileResult::new(
            "a.css",
            vec![block(json!({ "name": "plain" }))],
        )]);

        let arranged = arrange_by_sections(styleguide, "all.css");
        assert_eq!(arranged.len(), 1);
        assert!(arranged.files()[0].is_empty());
    }

    #[test]
    fn test_empty_styleguide() {
        let arranged = arrange_by_sections(Styleguide::default(), "app.css");
        assert_eq!(arranged.len(), 1);
        assert_eq!(arranged.block_count(), 0);
    }
}
