//! Tests for the station inventory


pub const ENGLISH_HEADER: &str = "code,name,latitude,longitude,altitude,municipality,state,basinCode,subBasinCode,riverCode,responsibleAgency,lastUpdate";
