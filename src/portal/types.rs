use serde::{Deserialize, Deserializer, Serialize};

/// Read an explicit `null` as the field's default, the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Station overview as returned by `getSingleStationOverview`.
///
/// Only the fields a reading is derived from are modeled; the portal sends
/// many more which are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StationOverview {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
    pub data: Option<OverviewData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverviewData {
    #[serde(deserialize_with = "null_as_default")]
    pub all_inverter_offline: bool,
    /// Load power
    #[serde(deserialize_with = "null_as_default")]
    pub pload: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub pload_unit: String,
    /// PV power
    #[serde(deserialize_with = "null_as_default")]
    pub pac: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub pac_unit: String,
}

impl OverviewData {
    pub fn is_offline(&self) -> bool {
        self.all_inverter_offline
    }
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub channel: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub salt: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    pub data: Option<LoginData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginData {
    #[serde(deserialize_with = "null_as_default")]
    pub token: String,
}

impl LoginResponse {
    /// Token carried by the response, if any
    pub fn token(&self) -> Option<&str> {
        self.data
            .as_ref()
            .map(|d| d.token.as_str())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_ignores_unknown_fields() {
        let raw = r#"{
            "code": "1000000",
            "msg": "success",
            "time": "2024-06-01 12:00:00",
            "data": {
                "id": "77",
                "name": null,
                "runType": 1,
                "allInverterOffline": false,
                "pac": 4500.0,
                "pacUnit": "W",
                "pload": 3.0,
                "ploadUnit": "kW",
                "etotal": 1234.5,
                "statisticData": null
            }
        }"#;
        let overview: StationOverview = serde_json::from_str(raw).unwrap();
        let data = overview.data.unwrap();
        assert!(!data.is_offline());
        assert_eq!(data.pac_unit, "W");
        assert_eq!(data.pload_unit, "kW");
        assert!((data.pload - 3.0).abs() < 1e-9);
    }

    #[test]
    fn overview_without_payload() {
        let overview: StationOverview =
            serde_json::from_str(r#"{"code":"3010022","msg":"token invalid","data":null}"#)
                .unwrap();
        assert_eq!(overview.code, "3010022");
        assert!(overview.data.is_none());
    }

    #[test]
    fn login_token_extraction() {
        let ok: LoginResponse = serde_json::from_str(r#"{"data":{"token":"t-1"}}"#).unwrap();
        assert_eq!(ok.token(), Some("t-1"));

        let empty: LoginResponse = serde_json::from_str(r#"{"data":{"token":""}}"#).unwrap();
        assert_eq!(empty.token(), None);

        let missing: LoginResponse =
            serde_json::from_str(r#"{"code":"2001","msg":"bad password"}"#).unwrap();
        assert_eq!(missing.token(), None);
    }

    #[test]
    fn overview_nulls_read_as_defaults() {
        let expired: StationOverview =
            serde_json::from_str(r#"{"code":"3010022","msg":null,"time":null,"data":null}"#)
                .unwrap();
        assert_eq!(expired.code, "3010022");
        assert!(expired.msg.is_empty());
        assert!(expired.time.is_empty());

        let offline: StationOverview = serde_json::from_str(
            r#"{"code":null,"data":{"allInverterOffline":true,"pac":null,"pacUnit":null,"pload":null,"ploadUnit":null}}"#,
        )
        .unwrap();
        assert!(offline.code.is_empty());
        let data = offline.data.unwrap();
        assert!(data.is_offline());
        assert_eq!(data.pac, 0.0);
        assert!(data.pload_unit.is_empty());

        let unknown_flag: OverviewData =
            serde_json::from_str(r#"{"allInverterOffline":null,"pac":1.5}"#).unwrap();
        assert!(!unknown_flag.is_offline());
    }

    #[test]
    fn login_nulls_read_as_defaults() {
        let null_token: LoginResponse =
            serde_json::from_str(r#"{"code":null,"msg":null,"data":{"token":null}}"#).unwrap();
        assert_eq!(null_token.token(), None);

        let ok: LoginResponse =
            serde_json::from_str(r#"{"code":"1000000","msg":null,"data":{"token":"t-2"}}"#)
                .unwrap();
        assert_eq!(ok.token(), Some("t-2"));
    }
}
