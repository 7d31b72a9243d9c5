use serde::{Deserialize, Serialize};

use shoplite_core::{DomainError, DomainResult, EntityId};

/// A configured shipping option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub id: EntityId,
    pub name: String,
    /// Flat fee in smallest currency unit.
    pub fee: u64,
}

/// A configured payment option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: EntityId,
    pub name: String,
    pub enabled: bool,
}

/// Shipping/payment configuration for one shop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSettings {
    shipping_methods: Vec<ShippingMethod>,
    payment_methods: Vec<PaymentMethod>,
}

impl ShopSettings {
    pub fn shipping_methods(&self) -> &[ShippingMethod] {
        &self.shipping_methods
    }

    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    /// Insert or replace a shipping method by id.
    pub fn upsert_shipping_method(
        &mut self,
        name: impl Into<String>,
        fee: u64,
        id: Option<EntityId>,
    ) -> DomainResult<EntityId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("shipping method name cannot be empty"));
        }
        match id {
            Some(id) => {
                let method = self
                    .shipping_methods
                    .iter_mut()
                    .find(|m| m.id == id)
                    .ok_or(DomainError::NotFound)?;
                method.name = name;
                method.fee = fee;
                Ok(id)
            }
            None => {
                let id = EntityId::new();
                self.shipping_methods.push(ShippingMethod { id, name, fee });
                Ok(id)
            }
        }
    }

    pub fn remove_shipping_method(&mut self, id: EntityId) -> DomainResult<ShippingMethod> {
        let pos = self
            .shipping_methods
            .iter()
            .position(|m| m.id == id)
            .ok_or(DomainError::NotFound)?;
        Ok(self.shipping_methods.remove(pos))
    }

    /// Insert or replace a payment method by id. New methods start enabled.
    pub fn upsert_payment_method(
        &mut self,
        name: impl Into<String>,
        id: Option<EntityId>,
    ) -> DomainResult<EntityId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("payment method name cannot be empty"));
        }
        match id {
            Some(id) => {
                let method = self
                    .payment_methods
                    .iter_mut()
                    .find(|m| m.id == id)
                    .ok_or(DomainError::NotFound)?;
                method.name = name;
                Ok(id)
            }
            None => {
                let id = EntityId::new();
                self.payment_methods.push(PaymentMethod { id, name, enabled: true });
                Ok(id)
            }
        }
    }

    pub fn set_payment_method_enabled(&mut self, id: EntityId, enabled: bool) -> DomainResult<()> {
        let method = self
            .payment_methods
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(DomainError::NotFound)?;
        method.enabled = enabled;
        Ok(())
    }

    pub fn remove_payment_method(&mut self, id: EntityId) -> DomainResult<PaymentMethod> {
        let pos = self
            .payment_methods
            .iter()
            .position(|m| m.id == id)
            .ok_or(DomainError::NotFound)?;
        Ok(self.payment_methods.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipping_method_upsert_and_remove() {
        let mut settings = ShopSettings::default();
        let id = settings.upsert_shipping_method("Courier", 500, None).unwrap();
        assert_eq!(settings.shipping_methods().len(), 1);

        settings.upsert_shipping_method("Courier Express", 800, Some(id)).unwrap();
        assert_eq!(settings.shipping_methods()[0].fee, 800);

        settings.remove_shipping_method(id).unwrap();
        assert!(settings.shipping_methods().is_empty());
        assert_eq!(
            settings.remove_shipping_method(id).unwrap_err(),
            DomainError::NotFound
        );
    }

    #[test]
    fn payment_method_toggle() {
        let mut settings = ShopSettings::default();
        let id = settings.upsert_payment_method("Cash on delivery", None).unwrap();
        assert!(settings.payment_methods()[0].enabled);

        settings.set_payment_method_enabled(id, false).unwrap();
        assert!(!settings.payment_methods()[0].enabled);
    }

    #[test]
    fn names_are_validated() {
        let mut settings = ShopSettings::default();
        assert!(settings.upsert_shipping_method("  ", 0, None).is_err());
        assert!(settings.upsert_payment_method("", None).is_err());
    }
}
