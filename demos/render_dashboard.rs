use air_quality_dashboard::{
    daily_aqi_table, station_ranking_table, summary_table, AirQualityDashboard,
};
use chrono::NaiveDate;

const SAMPLE: &str = "date,station,avg_AQI,PM2_5,PM10,SO2,NO2,CO,O3
2016-03-01,Dongsi,46,12,30,8,35,500,60
2016-03-01,Tiantan,58,18,41,9,40,600,55
2016-03-02,Dongsi,132,95,140,20,70,1500,20
2016-03-02,Tiantan,NaN,,,,,,
2016-03-03,Dongsi,210,160,200,25,90,2400,12
2016-03-03,Tiantan,175,120,160,22,80,1900,18
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let dashboard = AirQualityDashboard::from_csv_bytes(SAMPLE.as_bytes().to_vec())?;
    println!("Dataset spans {:?}", dashboard.date_bounds());

    let view = dashboard
        .view()
        .start(NaiveDate::from_ymd_opt(2016, 3, 1).unwrap())
        .end(NaiveDate::from_ymd_opt(2016, 3, 2).unwrap())
        .call()?;

    if let Ok(ranking) = &view.station_ranking {
        println!("{}", station_ranking_table(ranking)?);
    }
    if let Ok(daily) = &view.daily_aqi {
        println!("{}", daily_aqi_table(daily)?);
    }
    println!("{}", summary_table(&view.summary)?);

    println!("{}", serde_json::to_string_pretty(&view.report()?)?);
    Ok(())
}
