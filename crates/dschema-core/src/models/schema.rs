//! Discount schema document in the downstream system's wire format.
//!
//! Field names follow the consumer's import format, so most of them are
//! renamed on serialization. Identifier fields the consumer assigns itself
//! are always emitted as `0`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::document::{Flag, Outlet, SelectionMode};

/// Top-level discount schema for one agreement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountSchema {
    pub m_discountschema_id: u32,
    pub ad_org_id: u32,
    pub c_doctype_id: u32,
    pub name: String,
    pub description: String,
    pub discounttype: String,
    pub vendor_id: u32,
    pub requirementtype: String,
    pub flatdiscounttype: String,
    pub cumulativelevel: String,
    /// `yyyymmdd`.
    #[serde(rename = "validfrom")]
    pub valid_from: String,
    /// `yyyymmdd`.
    #[serde(rename = "validto")]
    pub valid_to: String,
    #[serde(rename = "selectiontype")]
    pub selection_mode: SelectionMode,
    pub budgettype: String,
    pub organizationaleffectiveness: String,
    #[serde(rename = "qtyallocated")]
    pub qty_allocated: u32,
    pub issotrx: Flag,
    pub ispickup: Flag,
    pub fl_isallowmultiplediscount: Flag,
    pub isincludingsubordinate: Flag,
    pub iscashpayment: Flag,
    pub isbirthdaydiscount: Flag,
    pub isactive: Flag,
    #[serde(rename = "list_org")]
    pub orgs: Vec<OrgAssignment>,
    #[serde(rename = "list_customer")]
    pub customers: Vec<Customer>,
    pub list_budget: Vec<serde_json::Value>,
    pub list_bonus: Vec<serde_json::Value>,
    #[serde(rename = "list_break")]
    pub breaks: Vec<DiscountBreak>,
}

/// Organization the schema is effective in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgAssignment {
    pub m_discountschema_id: u32,
    pub uns_discount_org_id: u32,
    pub ad_org_id: u32,
    #[serde(rename = "ad_orgtrx_id")]
    pub org_id: u32,
    pub isactive: Flag,
}

impl OrgAssignment {
    pub fn new(org_id: u32) -> Self {
        Self {
            m_discountschema_id: 0,
            uns_discount_org_id: 0,
            ad_org_id: 0,
            org_id,
            isactive: Flag::Yes,
        }
    }
}

/// Customer selected (or excluded) by the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub m_discountschema_id: u32,
    pub uns_discount_customer_id: u32,
    pub m_discountschemabreak_id: u32,
    pub ad_org_id: u32,
    #[serde(rename = "c_bpartner_id")]
    pub partner_id: String,
    pub name: String,
}

impl From<&Outlet> for Customer {
    fn from(outlet: &Outlet) -> Self {
        Self {
            m_discountschema_id: 0,
            uns_discount_customer_id: 0,
            m_discountschemabreak_id: 0,
            ad_org_id: 0,
            partner_id: outlet.partner_id.clone(),
            name: outlet.name.clone(),
        }
    }
}

/// Kind of break group emitted for a SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    /// Vendor-funded discount tiers.
    VendorCashback,
    /// Distributor-shared discount.
    ShareDiscount,
}

/// One {SKU, cashback-or-share} break group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountBreak {
    pub m_discountschema_id: u32,
    pub m_discountschemabreak_id: u32,
    pub ad_org_id: u32,
    #[serde(rename = "seqno")]
    pub sequence_number: u32,
    pub targetbreak: String,
    pub targetperiodic: Option<String>,
    pub discounttype: String,
    pub breaktype: String,
    pub calculationtype: String,
    pub selectiontype: Option<String>,
    pub name: String,
    pub requirementtype: String,
    pub productselection: String,
    pub salestype: Option<String>,
    pub saleslevel: Option<String>,
    #[serde(rename = "c_uom_id")]
    pub uom_code: u32,
    #[serde(rename = "m_product_id")]
    pub sku: String,
    pub m_product_category_id: Option<u32>,
    pub vendor_id: Option<u32>,
    pub budgettype: String,
    pub budgetcalculation: String,
    #[serde(rename = "qtyallocated")]
    pub qty_allocated: u32,
    pub breakvalue: u32,
    pub breakdiscount: u32,
    pub isincludingsubordinate: Flag,
    #[serde(rename = "isshareddiscount")]
    pub is_share_discount: Flag,
    pub isonlycountmaxrange: Flag,
    pub istragetbeforediscount: Flag,
    pub isbirthdaydiscount: Flag,
    pub ismix: Flag,
    pub isdiscountedbonus: Flag,
    #[serde(rename = "isstrictstrata")]
    pub is_strict_strata: Flag,
    #[serde(rename = "isvendorcashback")]
    pub is_vendor_cashback: Flag,
    pub ismixrequired: Flag,
    #[serde(rename = "isstratabudget")]
    pub is_strata_budget: Flag,
    pub isactive: Flag,
    pub list_product: Vec<serde_json::Value>,
    pub list_customer: Vec<serde_json::Value>,
    pub list_bonus: Vec<serde_json::Value>,
    pub list_budget: Vec<serde_json::Value>,
    #[serde(rename = "list_line")]
    pub lines: Vec<BreakLine>,
}

impl DiscountBreak {
    /// Empty break group carrying the fixed flags of a strata schema.
    pub fn new(
        kind: BreakKind,
        name: &str,
        sku: &str,
        uom_code: u32,
        qty_allocated: u32,
        sequence_number: u32,
    ) -> Self {
        Self {
            m_discountschema_id: 0,
            m_discountschemabreak_id: 0,
            ad_org_id: 0,
            sequence_number,
            targetbreak: "EP".to_string(),
            targetperiodic: None,
            discounttype: "PVD".to_string(),
            breaktype: "M".to_string(),
            calculationtype: "Q".to_string(),
            selectiontype: None,
            name: name.to_string(),
            requirementtype: "MS".to_string(),
            productselection: "IOP".to_string(),
            salestype: None,
            saleslevel: None,
            uom_code,
            sku: sku.to_string(),
            m_product_category_id: None,
            vendor_id: None,
            budgettype: "GB".to_string(),
            budgetcalculation: "QTY".to_string(),
            qty_allocated,
            breakvalue: 0,
            breakdiscount: 0,
            isincludingsubordinate: Flag::No,
            is_share_discount: Flag::from_bool(kind == BreakKind::ShareDiscount),
            isonlycountmaxrange: Flag::Yes,
            istragetbeforediscount: Flag::No,
            isbirthdaydiscount: Flag::No,
            ismix: Flag::No,
            isdiscountedbonus: Flag::No,
            is_strict_strata: Flag::Yes,
            is_vendor_cashback: Flag::from_bool(kind == BreakKind::VendorCashback),
            ismixrequired: Flag::No,
            is_strata_budget: Flag::Yes,
            isactive: Flag::Yes,
            list_product: Vec::new(),
            list_customer: Vec::new(),
            list_bonus: Vec::new(),
            list_budget: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn kind(&self) -> BreakKind {
        if self.is_vendor_cashback.is_yes() {
            BreakKind::VendorCashback
        } else {
            BreakKind::ShareDiscount
        }
    }
}

/// One quantity interval of a break group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakLine {
    pub m_discountschemabreak_id: u32,
    pub uns_dsbreakline_id: u32,
    pub name: String,
    #[serde(rename = "breakvalue")]
    pub break_from: u32,
    #[serde(rename = "breakvalueto")]
    pub break_to: u32,
    #[serde(rename = "qtyallocated")]
    pub qty_allocated: u32,
    /// Plain percentage, `2.5` means 2.5%.
    #[serde(rename = "breakdiscount", with = "rust_decimal::serde::float")]
    pub discount_value: Decimal,
    pub seconddiscount: u32,
    pub thirddiscount: u32,
    pub fourthdiscount: u32,
    pub fifthdiscount: u32,
    pub isactive: Flag,
    pub list_bonus: Vec<serde_json::Value>,
    pub list_budget: Vec<serde_json::Value>,
}

impl BreakLine {
    pub fn new(
        name: &str,
        break_from: u32,
        break_to: u32,
        qty_allocated: u32,
        discount_value: Decimal,
    ) -> Self {
        Self {
            m_discountschemabreak_id: 0,
            uns_dsbreakline_id: 0,
            name: name.to_string(),
            break_from,
            break_to,
            qty_allocated,
            discount_value,
            seconddiscount: 0,
            thirddiscount: 0,
            fourthdiscount: 0,
            fifthdiscount: 0,
            isactive: Flag::Yes,
            list_bonus: Vec::new(),
            list_budget: Vec::new(),
        }
    }
}
