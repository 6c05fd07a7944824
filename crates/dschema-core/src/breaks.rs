//! Compilation of a validated document into a discount schema.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    BreakKind, BreakLine, Customer, DiscountBreak, DiscountSchema, Document, DschemaConfig, Flag,
    OrgAssignment, Sequencing, SkuEntry, StrataTier,
};

/// Builds break groups and the surrounding schema.
pub struct BreakBuilder<'a> {
    config: &'a DschemaConfig,
    sequencing: Sequencing,
}

impl<'a> BreakBuilder<'a> {
    pub fn new(config: &'a DschemaConfig) -> Self {
        Self {
            config,
            sequencing: Sequencing::default(),
        }
    }

    pub fn with_sequencing(mut self, sequencing: Sequencing) -> Self {
        self.sequencing = sequencing;
        self
    }

    /// Compile `doc`. `customers` is the list attached to the schema.
    pub fn build(&self, doc: &Document, customers: &[Customer]) -> DiscountSchema {
        let name = doc.display_name();
        let break_name = doc.break_name();

        let mut breaks = Vec::new();
        for entry in &doc.sku_entries {
            let (vendor_seq, share_seq) = self.sequence_numbers(&entry.sku);
            let tiers = entry.sorted_tiers();

            if let Some(vendor) = self.vendor_break(entry, &tiers, &break_name, vendor_seq) {
                breaks.push(vendor);
            }
            if let Some(share) = self.share_break(doc, entry, &tiers, &break_name, share_seq) {
                breaks.push(share);
            }
        }
        // Stable: SKU order is kept within one sequence number.
        breaks.sort_by_key(|b| b.sequence_number);

        debug!("Built {} break(s) for {}", breaks.len(), doc.identifier);

        DiscountSchema {
            m_discountschema_id: 0,
            ad_org_id: 0,
            c_doctype_id: self.config.schema.doctype_id,
            name: name.clone(),
            description: name,
            discounttype: "B".to_string(),
            vendor_id: self.config.schema.vendor_id,
            requirementtype: "MS".to_string(),
            flatdiscounttype: "P".to_string(),
            cumulativelevel: "L".to_string(),
            valid_from: doc.valid_from.format("%Y%m%d").to_string(),
            valid_to: doc.valid_to.format("%Y%m%d").to_string(),
            selection_mode: doc.selection_mode,
            budgettype: "NB".to_string(),
            organizationaleffectiveness: "ISO".to_string(),
            qty_allocated: doc.qty_allocated,
            issotrx: Flag::Yes,
            ispickup: Flag::No,
            fl_isallowmultiplediscount: Flag::No,
            isincludingsubordinate: Flag::No,
            iscashpayment: Flag::No,
            isbirthdaydiscount: Flag::No,
            isactive: Flag::Yes,
            orgs: vec![OrgAssignment::new(doc.area.org_id)],
            customers: customers.to_vec(),
            list_budget: Vec::new(),
            list_bonus: Vec::new(),
            breaks,
        }
    }

    /// Sequence numbers of the cashback and share groups of one SKU.
    pub fn sequence_numbers(&self, sku: &str) -> (u32, u32) {
        match self.sequencing {
            Sequencing::Fixed => (10, 20),
            Sequencing::SizeBanded => {
                if sku.contains("1LT") || sku.contains("0.8LT") {
                    (10, 20)
                } else if sku.contains("2LT") || sku.contains("1.8LT") {
                    (30, 40)
                } else {
                    (50, 60)
                }
            }
        }
    }

    fn vendor_break(
        &self,
        entry: &SkuEntry,
        tiers: &[&StrataTier],
        name: &str,
        sequence_number: u32,
    ) -> Option<DiscountBreak> {
        if !tiers.iter().any(|t| t.discount_percent > Decimal::ZERO) {
            return None;
        }

        let mut group = DiscountBreak::new(
            BreakKind::VendorCashback,
            name,
            &entry.sku,
            entry.uom_code,
            entry.qty_allocated,
            sequence_number,
        );

        for (index, tier) in tiers.iter().enumerate() {
            if tier.discount_percent <= Decimal::ZERO {
                continue;
            }
            let break_to = tier.break_to.unwrap_or_else(|| {
                let inferred = tiers
                    .get(index + 1)
                    .map(|next| next.break_from.saturating_sub(1))
                    .unwrap_or(entry.qty_allocated);
                // An inferred bound never falls below the tier's own minimum.
                if inferred < tier.break_from {
                    debug!(
                        "{}: inferred upper bound {} below minimum {}, using the minimum",
                        entry.sku, inferred, tier.break_from
                    );
                }
                inferred.max(tier.break_from)
            });

            group.lines.push(BreakLine::new(
                name,
                tier.break_from,
                break_to,
                entry.qty_allocated,
                tier.discount_percent,
            ));
        }

        Some(group)
    }

    fn share_break(
        &self,
        doc: &Document,
        entry: &SkuEntry,
        tiers: &[&StrataTier],
        name: &str,
        sequence_number: u32,
    ) -> Option<DiscountBreak> {
        let tier = tiers
            .iter()
            .find(|t| t.share_discount_percent > Decimal::ZERO)?;
        let share = tier.share_discount_percent;

        let (break_from, break_to) = if entry.sku.ends_with("@10KG") && share == Decimal::new(5, 1)
        {
            (tier.break_from, 4)
        } else if share == Decimal::ONE {
            (1, 99)
        } else if let Some(break_to) = tier.break_to {
            (tier.break_from, break_to)
        } else if self
            .config
            .schema
            .reduced_bound_promo_types
            .iter()
            .any(|t| *t == doc.sub_promo_type)
        {
            let max_from = tiers.iter().map(|t| t.break_from).max().unwrap_or(1);
            (tier.break_from, max_from.saturating_sub(1).max(1))
        } else {
            (tier.break_from, entry.qty_allocated)
        };

        let mut group = DiscountBreak::new(
            BreakKind::ShareDiscount,
            name,
            &entry.sku,
            entry.uom_code,
            entry.qty_allocated,
            sequence_number,
        );
        group.lines.push(BreakLine::new(
            name,
            break_from,
            break_to,
            entry.qty_allocated,
            share,
        ));

        Some(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Area, SelectionMode};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn tier(from: u32, to: Option<u32>, disc: Decimal, share: Decimal) -> StrataTier {
        StrataTier {
            break_from: from,
            break_to: to,
            discount_percent: disc,
            share_discount_percent: share,
        }
    }

    fn entry(sku: &str, qty: u32, tiers: Vec<StrataTier>) -> SkuEntry {
        SkuEntry {
            sku: sku.to_string(),
            qty_allocated: qty,
            uom: "CTN".to_string(),
            uom_code: 1000001,
            strata_tiers: tiers,
        }
    }

    fn document(sub_promo_type: &str, entries: Vec<SkuEntry>) -> Document {
        Document {
            identifier: "CP24FRIPC012-3".to_string(),
            brand: "FORTUNE".to_string(),
            sub_promo_type: sub_promo_type.to_string(),
            valid_from: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            valid_to: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            qty_allocated: 100,
            vendor_cashback: Flag::Yes,
            area: Area {
                code: "01".to_string(),
                name: "PST".to_string(),
                org_id: 1000006,
            },
            uom: "CTN".to_string(),
            uom_code: 1000001,
            sku_entries: entries,
            outlets: Vec::new(),
            selection_mode: SelectionMode::IndividualAllocation,
        }
    }

    fn bounds(group: &DiscountBreak) -> Vec<(u32, u32, Decimal)> {
        group
            .lines
            .iter()
            .map(|l| (l.break_from, l.break_to, l.discount_value))
            .collect()
    }

    #[test]
    fn test_vendor_bounds_are_inferred() {
        let doc = document(
            "REGULAR",
            vec![entry(
                "FORTUNE PCH @1LT",
                100,
                vec![
                    tier(50, None, Decimal::new(3, 0), Decimal::ZERO),
                    tier(1, None, Decimal::new(1, 0), Decimal::ZERO),
                    tier(20, Some(40), Decimal::new(2, 0), Decimal::ZERO),
                ],
            )],
        );
        let config = DschemaConfig::default();
        let schema = BreakBuilder::new(&config).build(&doc, &[]);

        assert_eq!(schema.breaks.len(), 1);
        assert_eq!(
            bounds(&schema.breaks[0]),
            vec![
                (1, 19, Decimal::new(1, 0)),
                (20, 40, Decimal::new(2, 0)),
                (50, 100, Decimal::new(3, 0)),
            ]
        );
        assert_eq!(schema.valid_from, "20240301");
        assert_eq!(schema.name, "FORTUNE REGULAR PST");
        assert_eq!(schema.breaks[0].name, "CP24FRIPC012-3 FORTUNE REGULAR PST");
    }

    #[test]
    fn test_inferred_bound_never_below_minimum() {
        let doc = document(
            "REGULAR",
            vec![entry(
                "FORTUNE PCH @1LT",
                100,
                vec![
                    tier(1, None, Decimal::new(1, 0), Decimal::ZERO),
                    tier(150, None, Decimal::new(3, 0), Decimal::ZERO),
                ],
            )],
        );
        let config = DschemaConfig::default();
        let schema = BreakBuilder::new(&config).build(&doc, &[]);

        assert_eq!(
            bounds(&schema.breaks[0]),
            vec![
                (1, 149, Decimal::new(1, 0)),
                (150, 150, Decimal::new(3, 0)),
            ]
        );
    }

    #[test]
    fn test_zero_tiers_emit_no_breaks() {
        let doc = document(
            "REGULAR",
            vec![entry("FORTUNE PCH @1LT", 100, vec![StrataTier::open_default()])],
        );
        let config = DschemaConfig::default();
        assert!(BreakBuilder::new(&config).build(&doc, &[]).breaks.is_empty());
    }

    #[test]
    fn test_share_uses_first_positive_tier() {
        let doc = document(
            "REGULAR",
            vec![entry(
                "FORTUNE PCH @1LT",
                80,
                vec![
                    tier(1, None, Decimal::ZERO, Decimal::ZERO),
                    tier(10, None, Decimal::ZERO, Decimal::new(2, 0)),
                    tier(20, None, Decimal::ZERO, Decimal::new(3, 0)),
                ],
            )],
        );
        let config = DschemaConfig::default();
        let schema = BreakBuilder::new(&config).build(&doc, &[]);

        assert_eq!(schema.breaks.len(), 1);
        assert_eq!(schema.breaks[0].kind(), BreakKind::ShareDiscount);
        assert_eq!(bounds(&schema.breaks[0]), vec![(10, 80, Decimal::new(2, 0))]);
    }

    #[test]
    fn test_share_overrides() {
        let config = DschemaConfig::default();
        let builder = BreakBuilder::new(&config);

        let half = document(
            "REGULAR",
            vec![entry(
                "MILA TEPUNG @10KG",
                100,
                vec![tier(2, None, Decimal::ZERO, Decimal::new(5, 1))],
            )],
        );
        assert_eq!(
            bounds(&builder.build(&half, &[]).breaks[0]),
            vec![(2, 4, Decimal::new(5, 1))]
        );

        let one = document(
            "REGULAR",
            vec![entry(
                "FORTUNE PCH @1LT",
                100,
                vec![tier(30, Some(60), Decimal::ZERO, Decimal::ONE)],
            )],
        );
        assert_eq!(
            bounds(&builder.build(&one, &[]).breaks[0]),
            vec![(1, 99, Decimal::ONE)]
        );

        let reduced = document(
            "STRATA DISCOUNT",
            vec![entry(
                "FORTUNE PCH @1LT",
                100,
                vec![
                    tier(5, None, Decimal::ZERO, Decimal::new(2, 0)),
                    tier(25, None, Decimal::ZERO, Decimal::ZERO),
                ],
            )],
        );
        assert_eq!(
            bounds(&builder.build(&reduced, &[]).breaks[0]),
            vec![(5, 24, Decimal::new(2, 0))]
        );
    }

    #[test]
    fn test_size_banded_sequence() {
        let config = DschemaConfig::default();
        let builder = BreakBuilder::new(&config).with_sequencing(Sequencing::SizeBanded);

        assert_eq!(builder.sequence_numbers("FORTUNE PCH @1LT"), (10, 20));
        assert_eq!(builder.sequence_numbers("FORTUNE JRG @1.8LT"), (30, 40));
        assert_eq!(builder.sequence_numbers("FORTUNE PCH @2LT"), (30, 40));
        assert_eq!(builder.sequence_numbers("FORTUNE JRG @5LT"), (50, 60));

        let disc = Decimal::new(2, 0);
        let doc = document(
            "REGULAR",
            vec![
                entry("FORTUNE PCH @2LT", 10, vec![tier(1, None, disc, disc)]),
                entry("FORTUNE PCH @1LT", 10, vec![tier(1, None, disc, disc)]),
            ],
        );
        let seq: Vec<(u32, &str)> = builder
            .build(&doc, &[])
            .breaks
            .iter()
            .map(|b| (b.sequence_number, if b.sku.contains("@1LT") { "1" } else { "2" }))
            .collect();
        assert_eq!(seq, vec![(10, "1"), (20, "1"), (30, "2"), (40, "2")]);
    }

    #[test]
    fn test_fixed_sequence_interleaves_by_group() {
        let config = DschemaConfig::default();
        let disc = Decimal::new(2, 0);
        let doc = document(
            "REGULAR",
            vec![
                entry("FORTUNE PCH @2LT", 10, vec![tier(1, None, disc, disc)]),
                entry("FORTUNE PCH @1LT", 10, vec![tier(1, None, disc, disc)]),
            ],
        );
        let schema = BreakBuilder::new(&config).build(&doc, &[]);
        let order: Vec<(u32, &str)> = schema
            .breaks
            .iter()
            .map(|b| (b.sequence_number, b.sku.as_str()))
            .collect();

        assert_eq!(
            order,
            vec![
                (10, "FORTUNE PCH @2LT"),
                (10, "FORTUNE PCH @1LT"),
                (20, "FORTUNE PCH @2LT"),
                (20, "FORTUNE PCH @1LT"),
            ]
        );
    }
}
