//! # Liu Ren Chart Pallet Weights
//!
//! 大六壬起课模块权重定义

use frame_support::{traits::Get, weights::Weight};

/// 权重信息 Trait
pub trait WeightInfo {
    fn divine_by_solar_time() -> Weight;
    fn delete_chart() -> Weight;
}

/// Substrate 权重实现
pub struct SubstrateWeight<T>(core::marker::PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    /// 读: NextChartId, DailyChartCount
    /// 写: NextChartId, Charts, UserCharts, DailyChartCount
    fn divine_by_solar_time() -> Weight {
        Weight::from_parts(100_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(4))
    }
    fn delete_chart() -> Weight {
        Weight::from_parts(30_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(2))
    }
}

/// 默认权重实现（用于测试）
impl WeightInfo for () {
    fn divine_by_solar_time() -> Weight { Weight::from_parts(100_000_000, 0) }
    fn delete_chart() -> Weight { Weight::from_parts(30_000_000, 0) }
}
