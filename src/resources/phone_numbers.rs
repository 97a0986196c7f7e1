use super::resource_id;
use crate::models::{ListPhoneNumbersParams, PhoneNumber, validate_pagination};
use crate::{CallWhiz, Result};

const PHONE_NUMBERS: &str = "phone-numbers";
const FEATURE: &str = "phone numbers";

impl CallWhiz {
    /// # Errors
    /// Returns an error on a v1 client or if the request fails.
    pub async fn list_phone_numbers(
        &self,
        params: ListPhoneNumbersParams,
    ) -> Result<Vec<PhoneNumber>> {
        self.require_v2(FEATURE)?;
        validate_pagination(params.page, params.limit)?;
        self.rest().get_with_query(&[PHONE_NUMBERS], &params).await
    }

    /// # Errors
    /// Returns [`crate::Error::NotFound`] if the number is not on the account.
    pub async fn get_phone_number(&self, phone_number_id: &str) -> Result<PhoneNumber> {
        self.require_v2(FEATURE)?;
        let id = resource_id("phone_number_id", phone_number_id)?;
        self.rest().get(&[PHONE_NUMBERS, id]).await
    }
}
