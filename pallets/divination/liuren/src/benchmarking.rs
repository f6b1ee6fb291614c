//! # Liu Ren Chart Pallet Benchmarking
//!
//! 大六壬起课模块基准测试

#![cfg(feature = "runtime-benchmarks")]

use super::*;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn divine_by_solar_time() {
        let caller: T::AccountId = whitelisted_caller();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), 2024, 6, 15, 10, 30);

        assert!(UserCharts::<T>::get(&caller, 0));
    }

    #[benchmark]
    fn delete_chart() {
        let caller: T::AccountId = whitelisted_caller();
        let input = ChartInput { year: 2024, month: 6, day: 15, hour: 10, minute: 30 };
        let record = ChartRecord {
            id: 0,
            creator: caller.clone(),
            created_at: frame_system::Pallet::<T>::block_number(),
            input,
            mode: calendar::CalendarMode::Solar,
            day: GanZhi::default(),
            yue_jiang: types::DiZhi::Wu,
            method: san_chuan::SanChuanMethod::ZhiYi,
            san_chuan: [types::DiZhi::Zi, types::DiZhi::Si, types::DiZhi::Yin],
        };
        Charts::<T>::insert(0, record);
        UserCharts::<T>::insert(&caller, 0, true);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), 0);

        assert!(Charts::<T>::get(0).is_none());
    }

    impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::Test);
}
