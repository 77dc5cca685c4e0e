//! Every positional assumption about the bulletin layout lives here, so a
//! change in the upstream format is a data edit rather than a logic edit.

/// A tracked olive-oil product category.
#[derive(Debug, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    /// Exact text that starts the category's line in the bulletin.
    pub label: &'static str,
    /// Which of a region's matching lines holds this category's value.
    pub region_ordinal: Option<usize>,
}

impl Category {
    pub fn supports_regions(&self) -> bool {
        self.region_ordinal.is_some()
    }
}

/// A region broken out on the regional page.
#[derive(Debug, PartialEq, Eq)]
pub struct Region {
    /// Key used in serialized output.
    pub key: &'static str,
    pub label: &'static str,
    /// Whitespace token index of the value on the region's lines.
    pub value_token: usize,
    /// Number of ordinals the region has a cell for.
    pub ordinals: usize,
}

pub struct BulletinLayout {
    /// 1-based page carrying the national prices.
    pub national_page: u32,
    /// 1-based page carrying the regional breakdown.
    pub regional_page: u32,
    /// Token index of the value after the label is removed from a line.
    pub national_value_token: usize,
    /// Bold markup that may wrap labels in extracted text.
    pub markup_marker: &'static str,
}

pub const LAYOUT: BulletinLayout = BulletinLayout {
    national_page: 2,
    regional_page: 3,
    national_value_token: 1,
    markup_marker: "**",
};

// The ordinals line up with the column order of the regional table. aof, aouor
// and mso have no regional cell.
pub static CATEGORIES: [Category; 6] = [
    Category {
        id: "aove",
        label: "Aceite de oliva virgen extra",
        region_ordinal: Some(0),
    },
    Category {
        id: "aov",
        label: "Aceite de oliva virgen",
        region_ordinal: Some(1),
    },
    Category {
        id: "aol",
        label: "Aceite de oliva lampante",
        region_ordinal: Some(2),
    },
    Category {
        id: "aof",
        label: "Aceite de oliva refinado",
        region_ordinal: None,
    },
    Category {
        id: "aouor",
        label: "Aceite de orujo de oliva refinado",
        region_ordinal: None,
    },
    Category {
        id: "mso",
        label: "MEDIA SIN ORUJO",
        region_ordinal: None,
    },
];

// "Castilla-La Mancha" splits into two tokens, hence the shifted value token.
// Its row has no lampante cell.
pub static REGIONS: [Region; 4] = [
    Region {
        key: "andalucia",
        label: "Andalucía",
        value_token: 5,
        ordinals: 3,
    },
    Region {
        key: "catalunya",
        label: "Cataluña",
        value_token: 5,
        ordinals: 3,
    },
    Region {
        key: "castillaLaMancha",
        label: "Castilla-La Mancha",
        value_token: 6,
        ordinals: 2,
    },
    Region {
        key: "extremadura",
        label: "Extremadura",
        value_token: 5,
        ordinals: 3,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_three_virgin_and_lampante_categories_have_regions() {
        let regional: Vec<_> = CATEGORIES
            .iter()
            .filter(|c| c.supports_regions())
            .map(|c| c.id)
            .collect();
        assert_eq!(regional, vec!["aove", "aov", "aol"]);
    }

    #[test]
    fn region_ordinals_fit_the_region_table() {
        let widest = REGIONS.iter().map(|r| r.ordinals).max().unwrap();
        for category in &CATEGORIES {
            if let Some(ordinal) = category.region_ordinal {
                assert!(ordinal < widest, "{} ordinal out of range", category.id);
            }
        }
    }
}
