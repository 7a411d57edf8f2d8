//! Integration tests for orders, the catalog and discount strategies.

use domain::{
    DiscountContext, DomainError, FixedAmountDiscount, Money, Order, OrderError, OrderItem,
    OrderStatus, PercentageDiscount, Product, ProductCatalog,
};

fn sample_products() -> Vec<Product> {
    vec![
        Product::new("P001", "Laptop", Money::from_cents(99_999), 10),
        Product::new("P002", "Mouse", Money::from_cents(2_999), 50),
        Product::new("P003", "Keyboard", Money::from_cents(7_999), 30),
    ]
}

fn sample_order() -> Order {
    let products = sample_products();
    Order::new(
        "ORD001",
        vec![
            OrderItem::new(&products[0], 1),
            OrderItem::new(&products[1], 2),
        ],
        OrderStatus::Pending,
    )
}

mod totals {
    use super::*;

    #[test]
    fn total_is_sum_of_price_times_quantity() {
        let mut order = sample_order();
        assert_eq!(order.calculate_total(), Money::from_cents(105_997));
        assert_eq!(order.calculate_total().to_string(), "$1059.97");
    }

    #[test]
    fn total_covers_every_item() {
        let products = sample_products();
        let mut order = Order::new(
            "ORD002",
            products.iter().map(|p| OrderItem::new(p, 3)).collect(),
            OrderStatus::Pending,
        );

        let expected: i64 = products.iter().map(|p| p.price.cents() * 3).sum();
        assert_eq!(order.calculate_total().cents(), expected);
        assert_eq!(order.item_count(), 3);
    }
}

mod discounts {
    use super::*;

    fn thousand_dollar_order() -> Order {
        let product = Product::new("P010", "Monitor", Money::from_cents(50_000), 4);
        Order::new(
            "ORD100",
            vec![OrderItem::new(&product, 2)],
            OrderStatus::Pending,
        )
    }

    fn nine_hundred_dollar_order() -> Order {
        let product = Product::new("P011", "Chair", Money::from_cents(30_000), 9);
        Order::new(
            "ORD101",
            vec![OrderItem::new(&product, 3)],
            OrderStatus::Pending,
        )
    }

    #[test]
    fn ten_percent_off_a_thousand() {
        let mut order = thousand_dollar_order();
        let mut context = DiscountContext::default();
        context.set_strategy(Box::new(PercentageDiscount::new(10.0)));

        let amount = context.calculate_final_amount(&mut order);
        assert_eq!(amount.to_string(), "$900.00");
    }

    #[test]
    fn fifty_off_nine_hundred() {
        let mut order = nine_hundred_dollar_order();
        let mut context = DiscountContext::default();
        context.set_strategy(Box::new(FixedAmountDiscount::new(Money::from_dollars(50))));

        let amount = context.calculate_final_amount(&mut order);
        assert_eq!(amount.to_string(), "$850.00");
        assert_eq!(order.total_amount(), Money::from_dollars(900));
    }

    #[test]
    fn each_calculation_starts_from_item_total() {
        let mut order = sample_order();
        let mut context = DiscountContext::default();

        let original = context.calculate_final_amount(&mut order);
        context.set_strategy(Box::new(PercentageDiscount::new(10.0)));
        let after_percentage = context.calculate_final_amount(&mut order);
        context.set_strategy(Box::new(FixedAmountDiscount::new(Money::from_dollars(50))));
        let after_fixed = context.calculate_final_amount(&mut order);

        assert_eq!(original.to_string(), "$1059.97");
        assert_eq!(after_percentage.to_string(), "$953.97");
        assert_eq!(after_fixed.to_string(), "$1009.97");
        assert_eq!(order.total_amount(), original);
    }
}

mod transitions {
    use super::*;

    #[test]
    fn ship_before_confirm_is_rejected() {
        let mut order = sample_order();
        let err = order.ship().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid state transition: cannot ship from pending status"
        );
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn order_error_converts_into_domain_error() {
        let mut order = sample_order();
        let err: DomainError = order.deliver().unwrap_err().into();
        assert!(matches!(
            err,
            DomainError::Order(OrderError::InvalidStateTransition { .. })
        ));
    }
}

mod catalog {
    use super::*;

    #[test]
    fn stock_is_decremented_through_the_catalog_only() {
        let catalog = ProductCatalog::with_products(sample_products());
        let mut order = sample_order();

        order.confirm();
        assert_eq!(catalog.stock(&"P001".into()), Some(10));

        for item in order.items() {
            catalog
                .decrement_stock(&item.product_id, item.quantity)
                .unwrap();
        }
        assert_eq!(catalog.stock(&"P001".into()), Some(9));
        assert_eq!(catalog.stock(&"P002".into()), Some(48));
        assert_eq!(catalog.stock(&"P003".into()), Some(30));
    }
}
