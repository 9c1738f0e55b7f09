use rust_decimal::Decimal;

use super::flags::INC_VAT;
use super::locale::Country;
use super::types::*;

/// Builder for Address.
///
/// ```
/// use betalning::core::*;
///
/// let addr = AddressBuilder::person("Anna", "Andersson", "Storgatan 1", "11122", "Stockholm")
///     .country(Country::Se)
///     .care_of("Bengt")
///     .build();
/// assert!(!addr.is_company);
/// assert_eq!(addr.digest_fields()[0], "Bengt");
/// ```
pub struct AddressBuilder {
    address: Address,
}

impl AddressBuilder {
    /// Address of a private person.
    pub fn person(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        street: impl Into<String>,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            address: Address {
                is_company: false,
                first_name: first_name.into(),
                last_name: last_name.into(),
                street: street.into(),
                zip: zip.into(),
                city: city.into(),
                ..Default::default()
            },
        }
    }

    /// Address of a company.
    pub fn company(
        company_name: impl Into<String>,
        street: impl Into<String>,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            address: Address {
                is_company: true,
                company_name: company_name.into(),
                street: street.into(),
                zip: zip.into(),
                city: city.into(),
                ..Default::default()
            },
        }
    }

    pub fn country(mut self, country: Country) -> Self {
        self.address.country = Some(country);
        self
    }

    pub fn care_of(mut self, care_of: impl Into<String>) -> Self {
        self.address.care_of = care_of.into();
        self
    }

    pub fn house_number(mut self, number: impl Into<String>) -> Self {
        self.address.house_number = number.into();
        self
    }

    pub fn house_extension(mut self, extension: impl Into<String>) -> Self {
        self.address.house_extension = extension.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.address.email = email.into();
        self
    }

    pub fn telno(mut self, telno: impl Into<String>) -> Self {
        self.address.telno = telno.into();
        self
    }

    pub fn cellno(mut self, cellno: impl Into<String>) -> Self {
        self.address.cellno = cellno.into();
        self
    }

    pub fn build(self) -> Address {
        self.address
    }
}

/// Builder for GoodsLine. Flags default to [`INC_VAT`], discount to zero.
pub struct GoodsLineBuilder {
    art_no: String,
    title: String,
    price: i64,
    vat: Decimal,
    discount: Decimal,
    flags: u32,
}

impl GoodsLineBuilder {
    /// `price` is the unit price in minor units, `vat` a percentage.
    pub fn new(art_no: impl Into<String>, title: impl Into<String>, price: i64, vat: Decimal) -> Self {
        Self {
            art_no: art_no.into(),
            title: title.into(),
            price,
            vat,
            discount: Decimal::ZERO,
            flags: INC_VAT,
        }
    }

    /// Discount percentage.
    pub fn discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }

    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn build(self) -> GoodsLine {
        GoodsLine {
            art_no: self.art_no,
            title: self.title,
            price: self.price,
            vat: self.vat,
            discount: self.discount,
            flags: self.flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::flags::IS_SHIPMENT;
    use rust_decimal_macros::dec;

    #[test]
    fn company_address() {
        let addr = AddressBuilder::company("ACME AB", "Box 1", "11122", "Stockholm")
            .country(Country::Se)
            .build();
        assert!(addr.is_company);
        assert_eq!(addr.company_name, "ACME AB");
        assert!(addr.first_name.is_empty());
    }

    #[test]
    fn goods_line_defaults() {
        let line = GoodsLineBuilder::new("A1", "Shirt", 19900, dec!(25)).build();
        assert_eq!(line.flags, INC_VAT);
        assert_eq!(line.discount, Decimal::ZERO);
    }

    #[test]
    fn goods_line_overrides() {
        let line = GoodsLineBuilder::new("", "Shipping", 4900, dec!(25))
            .flags(INC_VAT | IS_SHIPMENT)
            .discount(dec!(5))
            .build();
        assert_eq!(line.flags, 40);
        assert_eq!(line.discount, dec!(5));
    }
}
