//! 供应商创建表单
//!
//! 级联地理选择: 选国家加载州列表，选州加载城市列表。国家列表在表单生命
//! 周期内只拉取一次。确认时以独立的变更集组提交主数据记录。

use std::collections::BTreeMap;

use catalog_client::{CatalogBackend, GeoClient};
use shared::changes::{ChangeOp, ChangeSet};
use shared::error::AppError;
use shared::models::{City, Country, CountryState, Supplier, SupplierCreate};

use crate::constants::CREATE_SUPPLIER_GROUP;
use crate::fields::{missing_required, FieldValue, FormField};
use crate::session::SessionError;

/// Zip codes are integer-like strings of 4 to 9 digits
pub fn is_valid_zip_code(zip: &str) -> bool {
    let digits = zip.len();

    !zip.is_empty() && zip.chars().all(|c| c.is_ascii_digit()) && digits > 3 && digits < 10
}

/// Supplier creation form with cascading geography selects
#[derive(Debug, Clone, Default)]
pub struct SupplierForm {
    name: Option<String>,
    /// ISO2 code of the selected country
    country: Option<String>,
    /// ISO2 code of the selected state
    state: Option<String>,
    city: Option<String>,
    street: Option<String>,
    zip_code: Option<String>,

    countries: Vec<Country>,
    states: Vec<CountryState>,
    cities: Vec<City>,

    field_errors: BTreeMap<&'static str, String>,
}

impl SupplierForm {
    /// Open the form, fetching the country list once for its lifetime
    pub async fn open(geo: &GeoClient) -> Self {
        Self {
            countries: geo.countries().await,
            ..Self::default()
        }
    }

    // ========== Option lists ==========

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn states(&self) -> &[CountryState] {
        &self.states
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    // ========== Field setters ==========

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
        self.clear_error_if_filled("name", FieldValue::Text(self.name.clone()));
    }

    /// Select a country: loads its states, resets state and city
    pub async fn set_country(&mut self, geo: &GeoClient, iso2: Option<String>) {
        self.country = iso2;
        self.state = None;
        self.city = None;
        self.cities.clear();

        self.states = match &self.country {
            Some(code) => geo.country_states(code).await,
            None => Vec::new(),
        };

        self.clear_error_if_filled("country", FieldValue::Select(self.country.clone()));
    }

    /// Select a state: loads its cities, resets the city
    pub async fn set_state(&mut self, geo: &GeoClient, iso2: Option<String>) {
        self.state = iso2;
        self.city = None;

        self.cities = match (&self.country, &self.state) {
            (Some(country), Some(state)) => geo.state_cities(country, state).await,
            _ => Vec::new(),
        };

        self.clear_error_if_filled("state", FieldValue::Select(self.state.clone()));
    }

    pub fn set_city(&mut self, city: Option<String>) {
        self.city = city;
        self.clear_error_if_filled("city", FieldValue::Select(self.city.clone()));
    }

    pub fn set_street(&mut self, street: Option<String>) {
        self.street = street;
        self.clear_error_if_filled("street", FieldValue::Text(self.street.clone()));
    }

    /// Set the zip code; the control validates on every change
    pub fn set_zip_code(&mut self, zip_code: Option<String>) {
        self.zip_code = zip_code;

        match self.zip_code.as_deref() {
            Some(zip) if !is_valid_zip_code(zip) => {
                self.field_errors
                    .insert("zip_code", "Zip code must be 4 to 9 digits".to_string());
            }
            _ => {
                self.field_errors.remove("zip_code");
            }
        }
    }

    fn clear_error_if_filled(&mut self, name: &'static str, value: FieldValue) {
        if !value.is_empty() {
            self.field_errors.remove(name);
        }
    }

    // ========== Validation ==========

    /// The weak check: no field currently carries an error state
    pub fn is_form_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn field_error(&self, name: &str) -> Option<&str> {
        self.field_errors.get(name).map(String::as_str)
    }

    fn form_fields(&self) -> Vec<FormField> {
        vec![
            FormField::required("name", FieldValue::Text(self.name.clone())),
            FormField::required("country", FieldValue::Select(self.country.clone())),
            FormField::required("state", FieldValue::Select(self.state.clone())),
            FormField::required("city", FieldValue::Select(self.city.clone())),
            FormField::required("street", FieldValue::Text(self.street.clone())),
            FormField::required("zip_code", FieldValue::Text(self.zip_code.clone())),
        ]
    }

    /// The strong check, run on confirm
    pub fn validate(&mut self) -> bool {
        // 1. Required scan over the supplier field group
        for name in missing_required(&self.form_fields()) {
            self.field_errors
                .entry(name)
                .or_insert_with(|| "Field is required".to_string());
        }

        // 2. Zip code shape
        if let Some(zip) = self.zip_code.as_deref() {
            if !is_valid_zip_code(zip) {
                self.field_errors
                    .entry("zip_code")
                    .or_insert_with(|| "Zip code must be 4 to 9 digits".to_string());
            }
        }

        self.field_errors.is_empty()
    }

    // ========== Confirm ==========

    /// Submit the supplier master record as its own change-set group.
    ///
    /// Returns the persisted supplier with its assigned id; the caller
    /// hands it to the edit session as a pending relation.
    pub async fn confirm(
        &mut self,
        backend: &dyn CatalogBackend,
    ) -> Result<Supplier, SessionError> {
        if !self.validate() {
            return Err(SessionError::Invalid);
        }

        let payload = SupplierCreate {
            name: self.name.clone().unwrap_or_default(),
            country: self.country.clone().unwrap_or_default(),
            state: self.state.clone().unwrap_or_default(),
            city: self.city.clone().unwrap_or_default(),
            street: self.street.clone().unwrap_or_default(),
            zip_code: self.zip_code.clone().unwrap_or_default(),
        };

        let mut batch = ChangeSet::new(CREATE_SUPPLIER_GROUP);
        batch.push(ChangeOp::CreateSupplier(payload));

        let outcome = backend.submit(batch).await?;

        outcome.created_supplier.ok_or_else(|| {
            SessionError::Backend(AppError::Service(
                "create outcome carried no supplier".to_string(),
            ))
        })
    }
}
