//! Downloadable sample CSV.

/// Header row plus one example shipment.
pub const SAMPLE_CSV: &str = "from_name,from_address,from_phone,to_name,to_address,to_phone,ship_date,weight,tracking\n\
Adnan,Kochi,99999,Rahul,Bangalore,88888,2025-02-01,1kg,TRK001";

pub const SAMPLE_FILENAME: &str = "sample.csv";

pub const CSV_MIME: &str = "text/csv";
