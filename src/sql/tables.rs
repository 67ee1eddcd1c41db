//! Table definitions for the six EcoImpact tables. Source of truth for DDL and column lists.

#[derive(Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub nullable: bool,
    /// Cast applied when selecting, so rows decode to one Rust type whatever the bulk loader stored.
    pub read_cast: Option<&'static str>,
}

#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    pub primary_key: &'static [&'static str],
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }
}

const fn col(name: &'static str, sql_type: &'static str, nullable: bool) -> ColumnDef {
    ColumnDef {
        name,
        sql_type,
        nullable,
        read_cast: None,
    }
}

const fn int_col(name: &'static str, nullable: bool) -> ColumnDef {
    ColumnDef {
        name,
        sql_type: "INTEGER",
        nullable,
        read_cast: Some("int4"),
    }
}

const fn float_col(name: &'static str, nullable: bool) -> ColumnDef {
    ColumnDef {
        name,
        sql_type: "DOUBLE PRECISION",
        nullable,
        read_cast: Some("float8"),
    }
}

const fn text_col(name: &'static str, nullable: bool) -> ColumnDef {
    ColumnDef {
        name,
        sql_type: "TEXT",
        nullable,
        read_cast: Some("text"),
    }
}

/// Per-country, per-year greenhouse-gas emissions by source.
pub const AIR_SUPER: TableDef = TableDef {
    name: "air_super",
    columns: &[
        col("country", "VARCHAR(255)", false),
        col("country_code", "VARCHAR(255)", false),
        int_col("year", false),
        float_col("total", false),
        float_col("coal", false),
        float_col("oil", false),
        float_col("gas", false),
        float_col("cement", false),
        float_col("flaring", false),
        float_col("other", false),
        float_col("per_capita", false),
        int_col("number_code", false),
    ],
    primary_key: &["country_code", "year"],
};

pub const COMPANIES: TableDef = TableDef {
    name: "companies",
    columns: &[
        col("parent_entity", "TEXT", false),
        col("parent_type", "TEXT", false),
        float_col("total_emissions", true),
    ],
    primary_key: &[],
};

pub const PLASTIC_PROJECTIONS: TableDef = TableDef {
    name: "plastic_projections",
    columns: &[
        int_col("year", false),
        float_col("coverage", false),
        text_col("impact", false),
    ],
    primary_key: &["year"],
};

/// Per-country waste statistics. No key: bulk loads may repeat a country.
pub const WATER_SUPER: TableDef = TableDef {
    name: "water_super",
    columns: &[
        col("country", "VARCHAR(100)", false),
        col("country_code", "VARCHAR(3)", false),
        float_col("total_waste", true),
        col("main_sources", "VARCHAR(255)", true),
        float_col("per_capita_waste_kg", false),
        float_col("recycling_rate", false),
        text_col("coastal_waste_risk", false),
    ],
    primary_key: &[],
};

pub const OBJECT_DEGRADATION: TableDef = TableDef {
    name: "object_degradation",
    columns: &[
        col("object_id", "SERIAL", false),
        col("object_name", "VARCHAR(255)", true),
        col("object_type", "VARCHAR(255)", true),
        col("time_period", "INTEGER", false),
    ],
    primary_key: &["object_id"],
};

pub const POLLUTION_TYPE: TableDef = TableDef {
    name: "pollution_type",
    columns: &[
        col("category_id", "SERIAL", false),
        col("category_name", "VARCHAR(225)", true),
        col("url", "VARCHAR(255)", true),
    ],
    primary_key: &["category_id"],
};

/// Creation order for `ensure_tables`.
pub const ALL_TABLES: &[&TableDef] = &[
    &AIR_SUPER,
    &COMPANIES,
    &PLASTIC_PROJECTIONS,
    &WATER_SUPER,
    &OBJECT_DEGRADATION,
    &POLLUTION_TYPE,
];
