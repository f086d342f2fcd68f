//! Census ACS 5-year variables grouped by topic.
//!
//! Variable codes are ACS detailed-table estimates (`_E` suffix). The full
//! catalog exceeds the per-call field cap, so `all` is always fetched in
//! batches.

use crate::measures::{FormatKind::*, Measure, MeasureGroup};

pub static TOPICS: &[MeasureGroup] = &[
    MeasureGroup {
        name: "population",
        measures: &[
            Measure::new("B01003_001E", "Total Population", "Total population", Number),
            Measure::new("B01001_002E", "Male Population", "Male population", Number),
            Measure::new("B01001_026E", "Female Population", "Female population", Number),
        ],
    },
    MeasureGroup {
        name: "age",
        measures: &[
            Measure::new("B01002_001E", "Median Age", "Median age, both sexes", Decimal),
            Measure::new("B01002_002E", "Median Age Male", "Median age, male", Decimal),
            Measure::new("B01002_003E", "Median Age Female", "Median age, female", Decimal),
            Measure::new("B09001_001E", "Population Under 18", "Population under 18 years", Number),
            Measure::new("B09021_022E", "Population 65 and Over", "Population 65 years and over in households", Number),
        ],
    },
    MeasureGroup {
        name: "race",
        measures: &[
            Measure::new("B02001_002E", "White Alone", "White alone", Number),
            Measure::new("B02001_003E", "Black Alone", "Black or African American alone", Number),
            Measure::new("B02001_004E", "American Indian Alone", "American Indian and Alaska Native alone", Number),
            Measure::new("B02001_005E", "Asian Alone", "Asian alone", Number),
            Measure::new("B02001_008E", "Two or More Races", "Two or more races", Number),
            Measure::new("B03003_003E", "Hispanic or Latino", "Hispanic or Latino of any race", Number),
        ],
    },
    MeasureGroup {
        name: "income",
        measures: &[
            Measure::new("B19013_001E", "Median Household Income", "Median household income (inflation-adjusted dollars)", Dollar),
            Measure::new("B19301_001E", "Per Capita Income", "Per capita income (inflation-adjusted dollars)", Dollar),
            Measure::new("B19113_001E", "Median Family Income", "Median family income (inflation-adjusted dollars)", Dollar),
            Measure::new("B19083_001E", "Gini Index", "Gini index of income inequality", Decimal),
        ],
    },
    MeasureGroup {
        name: "poverty",
        measures: &[
            Measure::new("B17001_001E", "Poverty Universe", "Population for whom poverty status is determined", Number),
            Measure::new("B17001_002E", "Below Poverty Level", "Income in the past 12 months below poverty level", Number),
            Measure::new("B17010_002E", "Families Below Poverty", "Families with income below poverty level", Number),
            Measure::new("B22001_002E", "SNAP Households", "Households receiving food stamps/SNAP", Number),
        ],
    },
    MeasureGroup {
        name: "employment",
        measures: &[
            Measure::new("B23025_002E", "In Labor Force", "Population 16+ in labor force", Number),
            Measure::new("B23025_004E", "Employed", "Civilian labor force, employed", Number),
            Measure::new("B23025_005E", "Unemployed", "Civilian labor force, unemployed", Number),
            Measure::new("B23025_007E", "Not in Labor Force", "Population 16+ not in labor force", Number),
        ],
    },
    MeasureGroup {
        name: "education",
        measures: &[
            Measure::new("B15003_001E", "Population 25 and Over", "Population 25 years and over", Number),
            Measure::new("B15003_017E", "High School Diploma", "Regular high school diploma", Number),
            Measure::new("B15003_021E", "Associate's Degree", "Associate's degree", Number),
            Measure::new("B15003_022E", "Bachelor's Degree", "Bachelor's degree", Number),
            Measure::new("B15003_023E", "Master's Degree", "Master's degree", Number),
            Measure::new("B15003_025E", "Doctorate Degree", "Doctorate degree", Number),
        ],
    },
    MeasureGroup {
        name: "housing",
        measures: &[
            Measure::new("B25001_001E", "Housing Units", "Total housing units", Number),
            Measure::new("B25002_002E", "Occupied Units", "Occupied housing units", Number),
            Measure::new("B25002_003E", "Vacant Units", "Vacant housing units", Number),
            Measure::new("B25003_002E", "Owner Occupied", "Owner-occupied housing units", Number),
            Measure::new("B25003_003E", "Renter Occupied", "Renter-occupied housing units", Number),
            Measure::new("B25077_001E", "Median Home Value", "Median value of owner-occupied units", Dollar),
            Measure::new("B25064_001E", "Median Gross Rent", "Median gross rent", Dollar),
        ],
    },
    MeasureGroup {
        name: "households",
        measures: &[
            Measure::new("B11001_001E", "Total Households", "Total households", Number),
            Measure::new("B11001_002E", "Family Households", "Family households", Number),
            Measure::new("B25010_001E", "Average Household Size", "Average household size of occupied units", Decimal),
        ],
    },
    MeasureGroup {
        name: "health_insurance",
        measures: &[
            Measure::new("B27010_001E", "Insurance Universe", "Civilian noninstitutionalized population", Number),
            Measure::new("B27010_017E", "Uninsured Under 19", "Under 19 years, no health insurance coverage", Number),
            Measure::new("B27010_033E", "Uninsured 19 to 34", "19 to 34 years, no health insurance coverage", Number),
            Measure::new("B27010_050E", "Uninsured 35 to 64", "35 to 64 years, no health insurance coverage", Number),
            Measure::new("B27010_066E", "Uninsured 65 and Over", "65 years and over, no health insurance coverage", Number),
        ],
    },
    MeasureGroup {
        name: "commute",
        measures: &[
            Measure::new("B08301_001E", "Workers 16 and Over", "Workers 16 years and over", Number),
            Measure::new("B08301_010E", "Public Transportation", "Commute by public transportation", Number),
            Measure::new("B08301_021E", "Worked From Home", "Worked from home", Number),
            Measure::new("B08303_001E", "Commuters Reporting Travel Time", "Workers who did not work from home", Number),
        ],
    },
    MeasureGroup {
        name: "veterans",
        measures: &[
            Measure::new("B21001_002E", "Veterans", "Civilian veterans 18 years and over", Number),
        ],
    },
];
