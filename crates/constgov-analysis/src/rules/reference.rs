//! Canonical reference mapping: which local constant mirrors which entry of
//! the reference enumeration, and with what value.

use std::collections::BTreeSet;

use constgov_core::errors::RuleError;
use constgov_core::types::collections::FxHashMap;
use serde::{Deserialize, Serialize};

/// One entry of the canonical mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEnumMapping {
    /// Reference enumeration entry, e.g. `OrderStatusEnum.PENDING_PAYMENT`.
    pub reference_enum_name: String,
    pub reference_value: i64,
    pub local_constant_name: String,
    pub local_value: i64,
    pub description: String,
}

impl ReferenceEnumMapping {
    pub fn new(reference_enum_name: &str, local_constant_name: &str, value: i64, description: &str) -> Self {
        Self {
            reference_enum_name: reference_enum_name.to_string(),
            reference_value: value,
            local_constant_name: local_constant_name.to_string(),
            local_value: value,
            description: description.to_string(),
        }
    }
}

/// Validated, read-only mapping table.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: Vec<ReferenceEnumMapping>,
    by_local_name: FxHashMap<String, usize>,
}

impl ReferenceTable {
    /// Build a table. Every entry must agree with itself (`local_value ==
    /// reference_value`) and each local constant may be mapped only once.
    pub fn new(entries: Vec<ReferenceEnumMapping>) -> Result<Self, RuleError> {
        let mut by_local_name = FxHashMap::default();
        for (index, entry) in entries.iter().enumerate() {
            if entry.local_value != entry.reference_value {
                return Err(RuleError::InconsistentMapping {
                    name: entry.local_constant_name.clone(),
                    reference_value: entry.reference_value,
                    local_value: entry.local_value,
                });
            }
            if by_local_name
                .insert(entry.local_constant_name.clone(), index)
                .is_some()
            {
                return Err(RuleError::DuplicateMapping {
                    name: entry.local_constant_name.clone(),
                });
            }
        }
        Ok(Self {
            entries,
            by_local_name,
        })
    }

    pub fn entries(&self) -> &[ReferenceEnumMapping] {
        &self.entries
    }

    pub fn get(&self, local_name: &str) -> Option<&ReferenceEnumMapping> {
        self.by_local_name
            .get(local_name)
            .and_then(|&i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct reference values, the basis of both heuristic allow-lists.
    pub fn values(&self) -> BTreeSet<i64> {
        self.entries.iter().map(|e| e.reference_value).collect()
    }
}

/// The compiled-in mall enumeration mapping.
pub fn default_reference_table() -> Result<ReferenceTable, RuleError> {
    let m = ReferenceEnumMapping::new;
    ReferenceTable::new(vec![
        m("OrderStatusEnum.PENDING_PAYMENT", "OrderStatusPendingPayment", 0, "待付款"),
        m("OrderStatusEnum.PENDING_DELIVERY", "OrderStatusPendingDelivery", 1, "待发货"),
        m("OrderStatusEnum.DELIVERED", "OrderStatusDelivered", 2, "已发货"),
        m("OrderStatusEnum.COMPLETED", "OrderStatusCompleted", 3, "已完成"),
        m("OrderStatusEnum.CLOSED", "OrderStatusClosed", 4, "已关闭"),
        m("OrderStatusEnum.INVALID", "OrderStatusInvalid", 5, "无效订单"),
        m("PayTypeEnum.UNPAID", "PayTypeUnpaid", 0, "未支付"),
        m("PayTypeEnum.ALIPAY", "PayTypeAlipay", 1, "支付宝"),
        m("PayTypeEnum.WECHAT", "PayTypeWechat", 2, "微信"),
        m("SourceTypeEnum.PC", "SourceTypePc", 0, "PC订单"),
        m("SourceTypeEnum.APP", "SourceTypeApp", 1, "app订单"),
        m("OrderTypeEnum.NORMAL", "OrderTypeNormal", 0, "正常订单"),
        m("OrderTypeEnum.SECKILL", "OrderTypeSeckill", 1, "秒杀订单"),
        m("CouponTypeEnum.UNIVERSAL", "CouponTypeUniversal", 0, "全场赠券"),
        m("CouponTypeEnum.MEMBER", "CouponTypeMember", 1, "会员赠券"),
        m("CouponTypeEnum.SHOPPING", "CouponTypeShopping", 2, "购物赠券"),
        m("CouponTypeEnum.REGISTER", "CouponTypeRegister", 3, "注册赠券"),
        m("CouponUseScopeEnum.ALL", "UseScopeAll", 0, "全场通用"),
        m("CouponUseScopeEnum.CATEGORY", "UseScopeCategory", 1, "指定分类"),
        m("CouponUseScopeEnum.PRODUCT", "UseScopeProduct", 2, "指定商品"),
        m("ReturnStatusEnum.PENDING", "ReturnStatusPending", 0, "待处理"),
        m("ReturnStatusEnum.RETURNING", "ReturnStatusReturning", 1, "退货中"),
        m("ReturnStatusEnum.COMPLETED", "ReturnStatusCompleted", 2, "已完成"),
        m("ReturnStatusEnum.REJECTED", "ReturnStatusRejected", 3, "已拒绝"),
        m("PublishStatusEnum.OFF_SHELF", "PublishStatusOffShelf", 0, "下架"),
        m("PublishStatusEnum.ON_SHELF", "PublishStatusOnShelf", 1, "上架"),
    ])
}
