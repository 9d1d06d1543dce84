//! Application services for standard and custom orders.
//!
//! Each service ties together payload validation, catalog lookups, the
//! pricing engine and the aggregate state machines, on top of pluggable
//! storage. Authorization is ownership-based: customers only touch their
//! own orders, admins touch everything.

use linkit_commerce::auth::Actor;
use linkit_commerce::catalog::Catalog;
use linkit_commerce::config::PricingPolicy;
use linkit_commerce::error::CommerceError;
use linkit_commerce::ids::{CustomOrderId, OrderId};
use linkit_commerce::money::Money;
use linkit_commerce::notify::{quote_email, QuoteEmail};
use linkit_commerce::orders::validation::{
    validate_admin_notes, validate_company_logo, validate_custom_order_fields,
    validate_required_fields,
};
use linkit_commerce::orders::{
    CustomOrder, CustomOrderDraft, CustomOrderStatus, Order, OrderDraft, OrderStatus,
    OrderSummary, OrderUpdate,
};
use linkit_commerce::pricing::{
    compute_order_total, estimate_custom_delivery, resolve_pricing_tier, TierInfo, Urgency,
};
use linkit_commerce::repo::{CustomOrderStore, OrderStore};
use linkit_commerce::softdelete::Deletable;

/// Service for standard card orders.
pub struct OrderService<C, S> {
    catalog: C,
    store: S,
    policy: PricingPolicy,
}

impl<C: Catalog, S: OrderStore> OrderService<C, S> {
    pub fn new(catalog: C, store: S, policy: PricingPolicy) -> Self {
        Self {
            catalog,
            store,
            policy,
        }
    }

    /// Place a new order.
    ///
    /// Validates the payload, resolves every catalog reference, computes
    /// the total server-side and stamps the delivery estimate.
    pub fn place_order(&self, draft: OrderDraft) -> Result<Order, CommerceError> {
        if let Some(reason) = validate_required_fields(&draft) {
            tracing::warn!(user = %draft.created_by, %reason, "order rejected");
            return Err(CommerceError::Validation(reason));
        }

        let product = self
            .catalog
            .find_product(&draft.product)?
            .ok_or_else(|| CommerceError::ProductNotFound(draft.product.to_string()))?;
        let country = self
            .catalog
            .find_country(&draft.delivery_info.country)?
            .ok_or_else(|| {
                CommerceError::CountryNotFound(draft.delivery_info.country.to_string())
            })?;
        let city = self
            .catalog
            .find_city(&draft.delivery_info.city)?
            .ok_or_else(|| CommerceError::CityNotFound(draft.delivery_info.city.to_string()))?;
        if city.country != country.id {
            return Err(CommerceError::Validation(
                "Selected city does not belong to the selected country".to_string(),
            ));
        }

        let mut addons = Vec::with_capacity(draft.addons.len());
        for order_addon in &draft.addons {
            let addon = self
                .catalog
                .find_addon(&order_addon.addon)?
                .ok_or_else(|| CommerceError::AddonNotFound(order_addon.addon.to_string()))?;
            addons.push(addon);
        }

        let pricing = compute_order_total(
            product.price,
            draft.card_design.include_printed_logo,
            self.policy.logo_surcharge(),
            city.delivery_fee,
            &addons,
        )?;

        let mut order = Order::new(draft, product.price, pricing);
        order.estimate_delivery(self.policy.standard_delivery_days(&country.code));
        self.store.insert(order.clone())?;

        tracing::info!(
            order = %order.id,
            user = %order.created_by,
            total = %order.total.display_with_code(),
            "order placed"
        );
        Ok(order)
    }

    /// Fetch an order the actor is allowed to see.
    pub fn get_order(&self, actor: &Actor, id: &OrderId) -> Result<Order, CommerceError> {
        let order = self
            .store
            .get(id)?
            .filter(|o| !o.is_deleted())
            .ok_or_else(|| CommerceError::OrderNotFound(id.to_string()))?;
        if !actor.is_admin() && !actor.is_user(&order.created_by) {
            return Err(CommerceError::Unauthorized(
                "You can only view your own orders".to_string(),
            ));
        }
        Ok(order)
    }

    /// Orders visible to the actor: everything for admins, own orders
    /// otherwise. Soft-deleted orders are excluded.
    pub fn list_orders(&self, actor: &Actor) -> Result<Vec<Order>, CommerceError> {
        let orders = if actor.is_admin() {
            self.store.list_all()?
        } else {
            self.store.list_for_user(&actor.id)?
        };
        Ok(orders.into_iter().filter(|o| !o.is_deleted()).collect())
    }

    /// Confirmation view of an order, with resolved place names.
    pub fn order_summary(&self, actor: &Actor, id: &OrderId) -> Result<OrderSummary, CommerceError> {
        let order = self.get_order(actor, id)?;
        let city = self.catalog.find_city(&order.delivery_info.city)?;
        let country = self.catalog.find_country(&order.delivery_info.country)?;
        Ok(order.summary(city.as_ref(), country.as_ref()))
    }

    /// Edit an order before fulfilment. Customers may only edit their own
    /// still-pending orders; admins may edit any.
    ///
    /// A patch that turns the printed logo on may rely on the logo already
    /// stored on the order. Totals are recomputed because the logo flag or
    /// the delivery city may have changed.
    pub fn update_order(
        &self,
        actor: &Actor,
        id: &OrderId,
        expected_version: u64,
        update: OrderUpdate,
    ) -> Result<Order, CommerceError> {
        let current = self.get_order(actor, id)?;
        if !actor.is_admin() && current.status != OrderStatus::Pending {
            return Err(CommerceError::Validation(
                "Only pending orders can be edited".to_string(),
            ));
        }

        let mut design = update
            .card_design
            .clone()
            .unwrap_or_else(|| current.card_design.clone());
        if let Some(reason) =
            validate_company_logo(&design, current.card_design.company_logo.as_deref())
        {
            return Err(CommerceError::Validation(reason));
        }
        // A patch without a new upload keeps the stored logo.
        if design.company_logo.is_none() {
            design.company_logo = current.card_design.company_logo.clone();
        }

        let delivery = update
            .delivery_info
            .clone()
            .unwrap_or_else(|| current.delivery_info.clone());
        let country = self
            .catalog
            .find_country(&delivery.country)?
            .ok_or_else(|| CommerceError::CountryNotFound(delivery.country.to_string()))?;
        let city = self
            .catalog
            .find_city(&delivery.city)?
            .ok_or_else(|| CommerceError::CityNotFound(delivery.city.to_string()))?;
        if city.country != country.id {
            return Err(CommerceError::Validation(
                "Selected city does not belong to the selected country".to_string(),
            ));
        }

        let mut addons = Vec::with_capacity(current.addons.len());
        for order_addon in &current.addons {
            let addon = self
                .catalog
                .find_addon(&order_addon.addon)?
                .ok_or_else(|| CommerceError::AddonNotFound(order_addon.addon.to_string()))?;
            addons.push(addon);
        }
        let pricing = compute_order_total(
            current.product_price,
            design.include_printed_logo,
            self.policy.logo_surcharge(),
            city.delivery_fee,
            &addons,
        )?;

        let order = self.store.update_with(id, expected_version, &mut |o| {
            if let Some(info) = update.personal_info.clone() {
                o.personal_info = info;
            }
            o.card_design = design.clone();
            o.delivery_info = delivery.clone();
            o.logo_surcharge = pricing.logo_surcharge;
            o.total = pricing.total;
            o.final_total = pricing.final_total;
            o.apply_contact_defaults();
            o.touch();
            Ok(())
        })?;
        tracing::info!(order = %order.id, total = %order.total.display_with_code(), "order updated");
        Ok(order)
    }

    /// Admin status update, with optional internal notes. Milestone dates
    /// are stamped exactly once by the aggregate.
    pub fn update_status(
        &self,
        actor: &Actor,
        id: &OrderId,
        expected_version: u64,
        status: &str,
        notes: Option<String>,
    ) -> Result<Order, CommerceError> {
        if !actor.is_admin() {
            tracing::warn!(order = %id, user = %actor.id, "status update denied");
            return Err(CommerceError::Unauthorized(
                "Only admins can update order status".to_string(),
            ));
        }
        let new_status = OrderStatus::parse(status)
            .ok_or_else(|| CommerceError::Validation(format!("Unknown order status: {status}")))?;
        if let Some(notes) = &notes {
            if let Some(reason) = validate_admin_notes(notes) {
                return Err(CommerceError::Validation(reason));
            }
        }

        let order = self.store.update_with(id, expected_version, &mut |o| {
            o.update_status(new_status);
            if let Some(notes) = notes.clone() {
                o.admin_notes = Some(notes);
            }
            Ok(())
        })?;
        tracing::info!(order = %order.id, status = new_status.as_str(), "order status updated");
        Ok(order)
    }

    /// Attach the deposit transaction image for an online payment.
    pub fn attach_deposit_image(
        &self,
        actor: &Actor,
        id: &OrderId,
        expected_version: u64,
        image_path: impl Into<String>,
    ) -> Result<Order, CommerceError> {
        // Ownership check happens in the fetch.
        self.get_order(actor, id)?;
        let image_path = image_path.into();
        self.store.update_with(id, expected_version, &mut |o| {
            o.desposite_transaction_img = Some(image_path.clone());
            Ok(())
        })
    }

    /// Soft-delete an order. Customers may only withdraw their own
    /// still-pending orders; admins may delete any.
    pub fn delete_order(
        &self,
        actor: &Actor,
        id: &OrderId,
        expected_version: u64,
    ) -> Result<(), CommerceError> {
        let order = self.get_order(actor, id)?;
        if !actor.is_admin() && order.status != OrderStatus::Pending {
            return Err(CommerceError::Validation(
                "Only pending orders can be deleted".to_string(),
            ));
        }
        self.store.update_with(id, expected_version, &mut |o| {
            o.soft_delete();
            Ok(())
        })?;
        tracing::info!(order = %id, "order deleted");
        Ok(())
    }

    /// Physically remove an order. Admin-only cleanup; everything else
    /// goes through the soft delete.
    pub fn purge(&self, actor: &Actor, id: &OrderId) -> Result<(), CommerceError> {
        if !actor.is_admin() {
            return Err(CommerceError::Unauthorized(
                "Only admins can purge orders".to_string(),
            ));
        }
        self.store.remove(id)?;
        tracing::info!(order = %id, "order purged");
        Ok(())
    }
}

/// Service for bulk custom-quote orders.
pub struct CustomOrderService<C, S> {
    catalog: C,
    store: S,
    policy: PricingPolicy,
}

impl<C: Catalog, S: CustomOrderStore> CustomOrderService<C, S> {
    pub fn new(catalog: C, store: S, policy: PricingPolicy) -> Self {
        Self {
            catalog,
            store,
            policy,
        }
    }

    /// Submit a new custom-order request.
    pub fn submit(&self, draft: CustomOrderDraft) -> Result<CustomOrder, CommerceError> {
        if let Some(reason) = validate_custom_order_fields(&draft) {
            return Err(CommerceError::Validation(reason));
        }
        let order = CustomOrder::new(draft);
        self.store.insert(order.clone())?;

        tracing::info!(
            order = %order.id,
            company = %order.company_info.company_name,
            quantity = order.order_details.employee_count,
            "custom order submitted"
        );
        Ok(order)
    }

    /// The pricing tier a quantity falls into, for the storefront's
    /// quote preview. None below the order minimum.
    pub fn tier_for(&self, quantity: i64) -> Option<TierInfo> {
        resolve_pricing_tier(quantity, &self.policy)
    }

    /// Estimated delivery days for a custom order of the given size.
    pub fn delivery_estimate(&self, quantity: i64, urgency: Urgency) -> i64 {
        estimate_custom_delivery(quantity, urgency, &self.policy)
    }

    /// Fetch a custom order the actor is allowed to see.
    pub fn get(&self, actor: &Actor, id: &CustomOrderId) -> Result<CustomOrder, CommerceError> {
        let order = self
            .store
            .get(id)?
            .filter(|o| !o.is_deleted())
            .ok_or_else(|| CommerceError::CustomOrderNotFound(id.to_string()))?;
        if !actor.is_admin() && !actor.is_user(&order.created_by) {
            return Err(CommerceError::Unauthorized(
                "You can only view your own orders".to_string(),
            ));
        }
        Ok(order)
    }

    /// Custom orders visible to the actor.
    pub fn list(&self, actor: &Actor) -> Result<Vec<CustomOrder>, CommerceError> {
        let orders = if actor.is_admin() {
            self.store.list_all()?
        } else {
            self.store.list_for_user(&actor.id)?
        };
        Ok(orders.into_iter().filter(|o| !o.is_deleted()).collect())
    }

    /// Admin transition through the status graph. Records the acting
    /// admin as the order's handler.
    pub fn update_status(
        &self,
        actor: &Actor,
        id: &CustomOrderId,
        expected_version: u64,
        status: &str,
    ) -> Result<CustomOrder, CommerceError> {
        if !actor.is_admin() {
            return Err(CommerceError::Unauthorized(
                "Only admins can update custom order status".to_string(),
            ));
        }
        let next = CustomOrderStatus::parse(status).ok_or_else(|| {
            CommerceError::Validation(format!("Unknown custom order status: {status}"))
        })?;

        let admin = actor.id.clone();
        let order = self.store.update_with(id, expected_version, &mut |o| {
            o.transition(next)?;
            o.handled_by = Some(admin.clone());
            Ok(())
        })?;
        tracing::info!(order = %order.id, status = next.as_str(), "custom order status updated");
        Ok(order)
    }

    /// Admin quote for a custom-pricing tier. The aggregate rejects
    /// fixed-pricing quantities and advances the order to `quoted`.
    pub fn set_pricing(
        &self,
        actor: &Actor,
        id: &CustomOrderId,
        expected_version: u64,
        price_per_card: Money,
    ) -> Result<CustomOrder, CommerceError> {
        if !actor.is_admin() {
            return Err(CommerceError::Unauthorized(
                "Only admins can set custom pricing".to_string(),
            ));
        }
        let admin = actor.id.clone();
        let policy = self.policy.clone();
        let order = self.store.update_with(id, expected_version, &mut |o| {
            o.set_custom_pricing(price_per_card, &policy)?;
            o.handled_by = Some(admin.clone());
            Ok(())
        })?;
        tracing::info!(
            order = %order.id,
            price_per_card = %price_per_card.display_with_code(),
            "custom pricing set"
        );
        Ok(order)
    }

    /// Match the order's quantity to a live package and quote from its
    /// fixed price.
    pub fn assign_package(
        &self,
        actor: &Actor,
        id: &CustomOrderId,
        expected_version: u64,
    ) -> Result<CustomOrder, CommerceError> {
        if !actor.is_admin() {
            return Err(CommerceError::Unauthorized(
                "Only admins can assign packages".to_string(),
            ));
        }
        let current = self.get(actor, id)?;
        let quantity = current.order_details.employee_count;
        let package = self
            .catalog
            .find_package_by_quantity(quantity)?
            .ok_or_else(|| {
                CommerceError::PackageNotFound(format!("no package covers {quantity} cards"))
            })?;

        let admin = actor.id.clone();
        let order = self.store.update_with(id, expected_version, &mut |o| {
            o.assign_package(&package)?;
            o.handled_by = Some(admin.clone());
            Ok(())
        })?;
        tracing::info!(order = %order.id, package = %package.name, "package assigned");
        Ok(order)
    }

    /// Record the owning customer's answer to a quote.
    pub fn respond_to_quote(
        &self,
        actor: &Actor,
        id: &CustomOrderId,
        expected_version: u64,
        approved: bool,
        customer_notes: Option<String>,
    ) -> Result<CustomOrder, CommerceError> {
        let order = self.get(actor, id)?;
        if !actor.is_user(&order.created_by) {
            return Err(CommerceError::Unauthorized(
                "You can only respond to your own orders".to_string(),
            ));
        }
        let order = self.store.update_with(id, expected_version, &mut |o| {
            o.respond_to_quote(approved, customer_notes.clone())
        })?;
        tracing::info!(order = %order.id, approved, "customer responded to quote");
        Ok(order)
    }

    /// Admin-only internal notes.
    pub fn set_admin_notes(
        &self,
        actor: &Actor,
        id: &CustomOrderId,
        expected_version: u64,
        notes: impl Into<String>,
    ) -> Result<CustomOrder, CommerceError> {
        if !actor.is_admin() {
            return Err(CommerceError::Unauthorized(
                "Only admins can set admin notes".to_string(),
            ));
        }
        let notes = notes.into();
        if let Some(reason) = validate_admin_notes(&notes) {
            return Err(CommerceError::Validation(reason));
        }
        self.store.update_with(id, expected_version, &mut |o| {
            o.admin_notes = Some(notes.clone());
            Ok(())
        })
    }

    /// Render the quote email for a quoted order.
    pub fn quote_email(
        &self,
        actor: &Actor,
        id: &CustomOrderId,
    ) -> Result<QuoteEmail, CommerceError> {
        if !actor.is_admin() {
            return Err(CommerceError::Unauthorized(
                "Only admins can send quotes".to_string(),
            ));
        }
        let order = self.get(actor, id)?;
        let package = match &order.selected_package {
            Some(package_id) => self.catalog.find_package(package_id)?,
            None => None,
        };
        quote_email(&order, package.as_ref())
    }

    /// Soft-delete a custom order. Customers may only withdraw their own
    /// still-pending requests; admins may delete any.
    pub fn delete(
        &self,
        actor: &Actor,
        id: &CustomOrderId,
        expected_version: u64,
    ) -> Result<(), CommerceError> {
        let order = self.get(actor, id)?;
        if !actor.is_admin() && order.status != CustomOrderStatus::Pending {
            return Err(CommerceError::Validation(
                "Only pending custom orders can be deleted".to_string(),
            ));
        }
        self.store.update_with(id, expected_version, &mut |o| {
            o.soft_delete();
            Ok(())
        })?;
        tracing::info!(order = %id, "custom order deleted");
        Ok(())
    }

    /// Physically remove a custom order. Admin-only cleanup.
    pub fn purge(&self, actor: &Actor, id: &CustomOrderId) -> Result<(), CommerceError> {
        if !actor.is_admin() {
            return Err(CommerceError::Unauthorized(
                "Only admins can purge orders".to_string(),
            ));
        }
        self.store.remove(id)?;
        tracing::info!(order = %id, "custom order purged");
        Ok(())
    }
}
