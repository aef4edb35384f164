#![forbid(unsafe_code)]

// Test datasets laid out like the published trailheads file.

use crate::trails::model::Trail;

pub const HEADER: &str = "OBJECTID,RESTROOMS,PICNIC,FISHING,PARKING,DOGS,ACCESSTYPE,CLASS,ADDRESS,FEE,\
BIKERACK,THLENGTH,ADACOMPLY,HORSETRAIL,BIKETRAIL,TRASHCAN,RECYCLING,DRINKWATER,SHELTER,GRILLS,\
PLAYGROUND,LIGHTING,PARKSPACES,ADASPACES,OWNER,MANAGER,LATITUDE,LONGITUDE,ZIPCODE,THNAME";

/// Build one 30 column data row.  Every field is quoted.
#[allow(clippy::too_many_arguments)]
pub fn row(name: &str, access_type: &str, restrooms: &str, picnic: &str, fishing: &str,
           class_code: &str, address: &str, fee: &str, bike_rack: &str) -> String {
    let mut fields = vec![String::new(); 30];
    fields[0] = "1".to_string();
    fields[1] = restrooms.to_string();
    fields[2] = picnic.to_string();
    fields[3] = fishing.to_string();
    fields[6] = access_type.to_string();
    fields[7] = class_code.to_string();
    fields[8] = address.to_string();
    fields[9] = fee.to_string();
    fields[10] = bike_rack.to_string();
    fields[29] = name.to_string();

    fields.iter().map(|f| format!("\"{}\"", f)).collect::<Vec<_>>().join(",")
}

/// Header plus rows, newline terminated.
pub fn dataset(rows: &[String]) -> String {
    let mut s = String::from(HEADER);
    s.push('\n');
    for r in rows {
        s.push_str(r);
        s.push('\n');
    }
    s
}

/// A trail built directly, for filter tests.
pub fn trail(name: &str, address: &str, difficulty: &str, flags: [bool; 5]) -> Trail {
    let [restrooms, picnic, fishing, fee, bike_rack] = flags;
    Trail {
        name: name.to_string(),
        access_type: "Public".to_string(),
        restrooms,
        picnic,
        fishing,
        address: address.to_string(),
        fee,
        bike_rack,
        difficulty: difficulty.to_string(),
    }
}
