//! Common regex patterns for promotion agreement extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Promo contract number, e.g. CP24FRIPC012-3
    pub static ref IDENTIFIER: Regex = Regex::new(
        r"(?i)CP\d{2}[A-Za-z]{3,5}\d{2,3}-\d+"
    ).unwrap();

    // Validity period: dd/mm/yyyy - dd/mm/yyyy
    pub static ref VALIDITY_PERIOD: Regex = Regex::new(
        r"(\d{2}/\d{2}/\d{4})\s*[-–]\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    // Brand label and the reference number that sometimes trails it
    pub static ref BRAND_LABEL: Regex = Regex::new(
        r"(?i)(?:BRAND|PRODUCT\s*BRAND)\s*[:=\s-]+\s*([A-Za-z\s]+)"
    ).unwrap();

    pub static ref BRAND_REF_SUFFIX: Regex = Regex::new(
        r"(?i)\s*REF\s*CP\s*NO"
    ).unwrap();

    // Known brand tokens, used when no label is found
    pub static ref BRAND_TOKEN: Regex = Regex::new(
        r"(?i)\b(MILA|FORTUNE|SARI MURNI)\b"
    ).unwrap();

    // Leading brand word of a catalog-shaped SKU
    pub static ref SKU_BRAND_PREFIX: Regex = Regex::new(
        r"(?i)^([A-Z]+)(?:\s+(?:PREMIUM RICE|PALM OIL))?(?:\s+(?:PLP|PCH|JRG))?(?:\s*@)"
    ).unwrap();

    // Distributor code ending in the area suffix, followed by "- CV"
    pub static ref DISTRIBUTOR: Regex = Regex::new(
        r"(?i)DISTRIBUTOR\s*[:=]?\s*([A-Z0-9-]+)\s*-\s*CV"
    ).unwrap();

    // Sub promo type after its two-digit code, e.g. "02SD - STRATA DISCOUNT"
    pub static ref SUB_PROMO_TYPE: Regex = Regex::new(
        r"(?i)SUB\s*PROMO\s*TYPE\s*[:=]?\s*\d{2}[A-Za-z]+\s*-\s*([A-Za-z\s]+)"
    ).unwrap();

    // Checked trading-term boxes
    pub static ref CASHBACK_INCLUDED: Regex = Regex::new(
        r"(?i)INCLUDE\s*TRADING\s*TERM\s*☑"
    ).unwrap();

    pub static ref CASHBACK_EXCLUDED: Regex = Regex::new(
        r"(?i)EXCLUDE\s*TRADING\s*TERM\s*☑"
    ).unwrap();

    // Product catalog
    pub static ref SKU_CATALOG: Regex = Regex::new(
        r"(?i)(MILA FLOUR BAG @1KG|MILA TEPUNG(?: \d+KG)?|TEPUNG MILA|FORTUNE (?:PREMIUM RICE|PALM OIL )?(?:PLP|PCH|JRG) @\d+(\.\d+)?[KL]T)"
    ).unwrap();

    // Aliases accepted only in file names
    pub static ref SKU_FILENAME_ALIAS: Regex = Regex::new(
        r"(?i)(MILA FLOUR|TEPUNG MILA)"
    ).unwrap();

    // UOM mentioned in free text, optionally with a size
    pub static ref UOM_HINT: Regex = Regex::new(
        r"(?i)\b(\d*\.?\d+)?\s*(KG|LT|PC|PCS)\b"
    ).unwrap();

    // UOM token inside a table cell
    pub static ref UOM_VALUE: Regex = Regex::new(
        r"(?i)\b(KG|LT|CTN|PCS)\b"
    ).unwrap();

    // Header keyword families
    pub static ref SALES_COMMITMENT_MARKER: Regex = Regex::new(
        r"(?i)SALES\s*CO(?:M)?MITMENT"
    ).unwrap();

    pub static ref MIN_QTY_HEADER: Regex = Regex::new(
        r"(?i)(MIN\s*QTY\s*/\s*CTN|MIN\s*QTY|MINIMUM\s*QUANTITY)"
    ).unwrap();

    pub static ref DISCOUNT_HEADER: Regex = Regex::new(
        r"(?i)(DISC\s*%|DISCOUNT\s*%|DISCOUNT)"
    ).unwrap();

    pub static ref SHARE_HEADER: Regex = Regex::new(
        r"(?i)(SHARE\s*DIST\s*%|SHARE\s*DISCOUNT\s*%|SHARE\s*%|SHARE)"
    ).unwrap();

    pub static ref QUANTITY_HEADER: Regex = Regex::new(
        r"(?i)(QTY\s*IN\s*CTN|QUANTITY\s*IN\s*CTN|QTY/CTN|QUANTITY|QTY|TOTAL\s*QTY)"
    ).unwrap();

    pub static ref SKU_HEADER: Regex = Regex::new(
        r"(?i)(SKU|PRODUCT|ITEM|NAMA\s*PRODUK|PRODUCT\s*NAME|ITEM\s*DESCRIPTION)"
    ).unwrap();

    pub static ref UOM_HEADER: Regex = Regex::new(
        r"(?i)(UOM|UNIT|SATUAN|MEASURE)"
    ).unwrap();

    // Loose tokens for header-less tables
    pub static ref LOOSE_QUANTITY: Regex = Regex::new(
        r"(?i)\b(\d+)\s*(?:CTN|KG|LT|PCS)?\b"
    ).unwrap();

    pub static ref LOOSE_PERCENT: Regex = Regex::new(
        r"\b(\d+\.?\d*)\s*%"
    ).unwrap();
}
